//! Everything a single popup owns between argument parsing and exit.

use std::io;

use cosmic::iced::Font;
use cosmic_toast_config::ToastConfig;
use cosmic_toast_util::{
    BoxGeometry, BoxSize, CellMetrics, DismissError, DismissOutcome, DismissalCoordinator,
    EdgeGaps, InputEvent, LineSet, NotificationText, ScreenBounds, TextMeasure, box_size, place,
    wrap,
};
use tokio::sync::{mpsc, oneshot};

use crate::constants::{DISMISSAL_THREAD, FAILURE_CODE};
use crate::fonts;

pub type Resolution = Result<DismissOutcome, DismissError>;

/// Wrapped text, fonts and box size for one notification.
///
/// Built once before anything is shown and only read afterwards. Dropping it
/// releases every resource the popup holds; [`Session::finish`] and
/// [`Session::fail`] drop it before the process exits.
pub struct Session {
    config: ToastConfig,
    lines: LineSet,
    size: BoxSize,
    metrics: CellMetrics,
    title_font: Font,
    body_font: Font,
}

impl Session {
    pub fn new(text: NotificationText, config: ToastConfig) -> Self {
        let metrics = fonts::cell_metrics(&config.body_font);
        let lines = wrap(text.as_str(), config.max_text_width(), &metrics);
        if lines.is_empty() {
            tracing::warn!(
                max_width = config.max_text_width(),
                "text does not fit the configured width, showing an empty box"
            );
        }

        let size = box_size(
            lines.len(),
            metrics.line_height(),
            config.line_spacing,
            config.padding,
            config.width,
        );

        Self {
            title_font: fonts::face(&config.title_font),
            body_font: fonts::face(&config.body_font),
            config,
            lines,
            size,
            metrics,
        }
    }

    pub fn config(&self) -> &ToastConfig {
        &self.config
    }

    pub fn lines(&self) -> &LineSet {
        &self.lines
    }

    pub fn size(&self) -> BoxSize {
        self.size
    }

    pub fn line_height(&self) -> i32 {
        self.metrics.line_height()
    }

    pub fn title_font(&self) -> Font {
        self.title_font
    }

    pub fn body_font(&self) -> Font {
        self.body_font
    }

    /// Box size including the border on both sides.
    pub fn outer_size(&self) -> BoxSize {
        let border = 2 * self.config.border_size;
        BoxSize {
            width: self.size.width + border,
            height: self.size.height + border,
        }
    }

    /// Where the box lands inside `screen`.
    pub fn geometry_within(&self, screen: &ScreenBounds) -> BoxGeometry {
        let origin = place(
            self.size,
            screen,
            self.config.corner,
            self.config.inset_x,
            self.config.inset_y,
            self.config.border_size,
        );
        BoxGeometry::new(origin, self.size)
    }

    /// Edge gaps when the screen size is unknown; the anchored edges still sit
    /// at the configured insets.
    pub fn inset_gaps(&self) -> EdgeGaps {
        EdgeGaps {
            top: self.config.inset_y,
            right: self.config.inset_x,
            bottom: self.config.inset_y,
            left: self.config.inset_x,
        }
    }

    /// Start the input and timeout watchers on their own thread.
    ///
    /// The returned receiver yields the single outcome of the race.
    pub fn start_dismissal(
        &self,
        events: mpsc::UnboundedReceiver<InputEvent>,
    ) -> io::Result<oneshot::Receiver<Resolution>> {
        let mut coordinator = DismissalCoordinator::new(self.config.timeout());
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()?;

        let (tx, rx) = oneshot::channel();
        std::thread::Builder::new()
            .name(DISMISSAL_THREAD.to_string())
            .spawn(move || {
                let resolution = runtime.block_on(coordinator.run(events));
                _ = tx.send(resolution);
            })?;

        tracing::debug!(timeout = ?self.config.timeout(), "dismissal watchers started");
        Ok(rx)
    }

    /// Release everything and exit with `code`.
    pub fn finish(self, code: u8) -> ! {
        drop(self);
        std::process::exit(i32::from(code))
    }

    /// Report a fatal error, release everything and exit.
    pub fn fail(self, err: anyhow::Error) -> ! {
        crate::report(&err);
        self.finish(FAILURE_CODE)
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        tracing::debug!(lines = self.lines.len(), "releasing notification resources");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cosmic_toast_config::Corner;

    fn session(text: &str, config: ToastConfig) -> Session {
        Session::new(NotificationText::from_args([text]).unwrap(), config)
    }

    #[test]
    fn test_single_line_box() {
        let session = session("Build finished", ToastConfig::default());

        assert_eq!(session.lines().len(), 1);
        assert_eq!(session.size(), BoxSize { width: 450, height: 19 + 45 });
        assert_eq!(session.outer_size(), BoxSize { width: 454, height: 68 });
    }

    #[test]
    fn test_long_text_wraps_into_body_lines() {
        let text = "Your backup of 1204 files to the remote archive finished without errors \
                    and the next run is scheduled for tomorrow morning";
        let session = session(text, ToastConfig::default());

        assert!(session.lines().len() > 1);
        assert_eq!(session.lines().rejoin(), text);
        let n = session.lines().len() as i32;
        assert_eq!(session.size().height, n * 19 + (n - 1) * 5 + 45);
    }

    #[test]
    fn test_geometry_top_right() {
        let session = session("hello", ToastConfig::default());
        let screen = ScreenBounds::from_size(1920, 1080);
        let geometry = session.geometry_within(&screen);

        assert_eq!(geometry.x, 1920 - 450 - 4 - 30);
        assert_eq!(geometry.y, 60);
        let gaps = geometry.edge_gaps(&screen, 2);
        assert_eq!((gaps.top, gaps.right), (60, 30));
    }

    #[test]
    fn test_geometry_bottom_left() {
        let config = ToastConfig {
            corner: Corner::BottomLeft,
            ..ToastConfig::default()
        };
        let session = session("hello", config);
        let screen = ScreenBounds::from_size(1920, 1080);
        let geometry = session.geometry_within(&screen);

        assert_eq!(geometry.x, 30);
        assert_eq!(geometry.y, 1080 - 64 - 4 - 60);
        assert_eq!(geometry.edge_gaps(&screen, 2).bottom, 60);
    }

    #[test]
    fn test_inset_gaps_match_any_screen() {
        let session = session("hello", ToastConfig::default());
        let gaps = session.inset_gaps();
        let placed = session
            .geometry_within(&ScreenBounds::from_size(2560, 1440))
            .edge_gaps(&ScreenBounds::from_size(2560, 1440), 2);

        assert_eq!((gaps.top, gaps.right), (placed.top, placed.right));
    }

    #[test]
    fn test_start_dismissal_without_timer_reports_closed_input() {
        let config = ToastConfig {
            duration: 0,
            ..ToastConfig::default()
        };
        let session = session("hello", config);
        let (tx, rx) = mpsc::unbounded_channel();
        drop(tx);

        let resolution = session.start_dismissal(rx).unwrap().blocking_recv().unwrap();
        assert_eq!(resolution, Err(DismissError::InputClosed));
    }

    #[test]
    fn test_start_dismissal_input_wins() {
        let session = session("hello", ToastConfig::default());
        let (tx, rx) = mpsc::unbounded_channel();
        tx.send(InputEvent::ButtonPressed(cosmic_toast_util::PointerButton::Secondary))
            .unwrap();

        let resolution = session.start_dismissal(rx).unwrap().blocking_recv().unwrap();
        assert_eq!(resolution, Ok(DismissOutcome::UserDismissed));
    }
}
