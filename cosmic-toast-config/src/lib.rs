use std::time::Duration;

pub const ID: &str = "com.system76.CosmicToast";

/// Screen corner the popup is offset from.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Corner {
    TopLeft,
    #[default]
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Corner {
    pub const fn is_top(self) -> bool {
        matches!(self, Corner::TopLeft | Corner::TopRight)
    }

    pub const fn is_left(self) -> bool {
        matches!(self, Corner::TopLeft | Corner::BottomLeft)
    }
}

/// Packed `0xRRGGBBAA` color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct Rgba(pub u32);

impl Rgba {
    pub const fn r(self) -> u8 {
        (self.0 >> 24) as u8
    }

    pub const fn g(self) -> u8 {
        (self.0 >> 16) as u8
    }

    pub const fn b(self) -> u8 {
        (self.0 >> 8) as u8
    }

    pub const fn a(self) -> u8 {
        self.0 as u8
    }

    /// Alpha as a 0.0-1.0 fraction
    pub fn alpha(self) -> f32 {
        f32::from(self.a()) / 255.0
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum FontWeight {
    #[default]
    Regular,
    Bold,
}

/// Reference to a font face used for one text style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct FontSpec {
    pub weight: FontWeight,
    /// Pixel size of the face
    pub size: u16,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ToastConfig {
    pub background: Rgba,
    pub border_color: Rgba,
    pub text_color: Rgba,
    /// Face for the first line.
    pub title_font: FontSpec,
    /// Face for every line after the first.
    pub body_font: FontSpec,
    pub line_spacing: i32,
    pub padding: i32,
    /// Fixed box width in pixels, excluding the border.
    pub width: i32,
    pub border_size: i32,
    /// Horizontal distance from the anchored screen edge.
    pub inset_x: i32,
    /// Vertical distance from the anchored screen edge.
    pub inset_y: i32,
    pub corner: Corner,
    /// Seconds before the popup closes on its own. Zero or negative keeps it
    /// open until the user acts.
    pub duration: i32,
}

impl Default for ToastConfig {
    fn default() -> Self {
        Self {
            background: Rgba(0x3e3e3eff),
            border_color: Rgba(0xecececff),
            text_color: Rgba(0xecececff),
            title_font: FontSpec {
                weight: FontWeight::Bold,
                size: 13,
            },
            body_font: FontSpec {
                weight: FontWeight::Regular,
                size: 13,
            },
            line_spacing: 5,
            padding: 15,
            width: 450,
            border_size: 2,
            inset_x: 30,
            inset_y: 60,
            corner: Corner::default(),
            duration: 5,
        }
    }
}

impl ToastConfig {
    /// Pixel budget available to a single line of text.
    pub const fn max_text_width(&self) -> i32 {
        self.width - 2 * self.padding
    }

    /// Auto-dismiss delay, or `None` when the timer is disabled.
    pub fn timeout(&self) -> Option<Duration> {
        u64::try_from(self.duration)
            .ok()
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }
}
