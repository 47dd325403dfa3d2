use cosmic::app::{Core, Settings};
use cosmic::iced::event::wayland::{Event as WaylandEvent, OutputEvent};
use cosmic::iced::event::{self, PlatformSpecific};
use cosmic::iced::platform_specific::runtime::wayland::layer_surface::{
    IcedMargin, IcedOutput, SctkLayerSurfaceSettings,
};
use cosmic::iced::platform_specific::shell::wayland::commands::layer_surface::{
    Anchor, KeyboardInteractivity, Layer, get_layer_surface,
};
use cosmic::iced::{self, Border, Color, Length, Limits, Subscription, keyboard, mouse, window};
use cosmic::iced_runtime::core::window::Id as SurfaceId;
use cosmic::iced_widget::{Column, container as iced_container, vertical_space};
use cosmic::widget::{container, text};
use cosmic::{Element, app::Task};
use cosmic_toast_config::{Corner, Rgba, ToastConfig};
use cosmic_toast_util::{
    EdgeGaps, InputEvent, Key, NotificationText, PointerButton, ScreenBounds,
};
use tokio::sync::mpsc;

use crate::constants::{FAILURE_CODE, LAYER_NAMESPACE, OUTPUT_WAIT, SURFACE_WAIT};
use crate::fl;
use crate::session::{Resolution, Session};

pub fn run(flags: Flags) -> cosmic::iced::Result {
    cosmic::app::run::<CosmicToast>(
        Settings::default()
            .antialiasing(true)
            .client_decorations(true)
            .debug(false)
            .no_main_window(true)
            .exit_on_close(false),
        flags,
    )?;
    Ok(())
}

#[derive(Debug, Clone)]
pub struct Flags {
    pub text: NotificationText,
    pub config: ToastConfig,
}

struct CosmicToast {
    core: Core,
    surface_id: SurfaceId,
    surface: Surface,
    session: Option<Session>,
    input_tx: Option<mpsc::UnboundedSender<InputEvent>>,
}

/// Lifecycle of the popup surface.
#[derive(Debug, Default)]
enum Surface {
    #[default]
    Unmapped,
    /// Requested from the compositor; input is queued until it shows.
    Requested(mpsc::UnboundedReceiver<InputEvent>),
    Shown,
}

impl Surface {
    fn is_unmapped(&self) -> bool {
        matches!(self, Surface::Unmapped)
    }

    /// Move a requested surface to shown and hand over its queued input.
    fn mark_shown(&mut self) -> Option<mpsc::UnboundedReceiver<InputEvent>> {
        match std::mem::replace(self, Surface::Shown) {
            Surface::Requested(events) => Some(events),
            previous => {
                *self = previous;
                None
            }
        }
    }
}

#[derive(Debug, Clone)]
pub enum Message {
    OutputBounds(ScreenBounds),
    OutputUnknown,
    SurfaceShown(SurfaceId),
    Input(InputEvent),
    Resolved(Option<Resolution>),
}

impl CosmicToast {
    /// Request the popup surface once. Input is queued from here on.
    fn show(&mut self, gaps: EdgeGaps) -> Task<Message> {
        if !self.surface.is_unmapped() {
            return Task::none();
        }
        let Some(session) = self.session.as_ref() else {
            return Task::none();
        };

        let corner = session.config().corner;
        let size = session.outer_size();
        let width = size.width.max(1) as u32;
        let height = size.height.max(1) as u32;
        tracing::debug!(?corner, ?gaps, width, height, "mapping popup surface");

        let (events_tx, events_rx) = mpsc::unbounded_channel();
        self.input_tx = Some(events_tx);
        self.surface = Surface::Requested(events_rx);

        // Compositors that never report the surface still get a timeout.
        let surface_id = self.surface_id;
        let surface_wait = iced::Task::perform(tokio::time::sleep(SURFACE_WAIT), move |_| {
            cosmic::action::app(Message::SurfaceShown(surface_id))
        });

        Task::batch(vec![
            get_layer_surface(SctkLayerSurfaceSettings {
                id: self.surface_id,
                layer: Layer::Overlay,
                anchor: corner_anchor(corner),
                exclusive_zone: 0,
                keyboard_interactivity: KeyboardInteractivity::OnDemand,
                namespace: LAYER_NAMESPACE.to_string(),
                margin: corner_margin(corner, gaps),
                size: Some((Some(width), Some(height))),
                output: IcedOutput::Active,
                size_limits: Limits::NONE
                    .min_width(width as f32)
                    .max_width(width as f32)
                    .min_height(height as f32)
                    .max_height(height as f32),
                ..Default::default()
            }),
            surface_wait,
        ])
    }

    /// Start the dismissal race on the shown surface.
    fn start_race(&mut self, events: mpsc::UnboundedReceiver<InputEvent>) -> Task<Message> {
        let Some(session) = self.session.as_ref() else {
            return Task::none();
        };
        let resolved = match session.start_dismissal(events) {
            Ok(resolved) => resolved,
            Err(err) => self.fail(anyhow::Error::new(err).context(fl!("error-runtime"))),
        };

        iced::Task::perform(resolved, |resolution| {
            cosmic::action::app(Message::Resolved(resolution.ok()))
        })
    }

    fn fail(&mut self, err: anyhow::Error) -> ! {
        match self.session.take() {
            Some(session) => session.fail(err),
            None => {
                crate::report(&err);
                std::process::exit(i32::from(FAILURE_CODE))
            }
        }
    }
}

impl cosmic::Application for CosmicToast {
    type Message = Message;
    type Executor = cosmic::executor::single::Executor;
    type Flags = Flags;
    const APP_ID: &'static str = cosmic_toast_config::ID;

    fn init(core: Core, flags: Flags) -> (Self, Task<Message>) {
        let session = Session::new(flags.text, flags.config);

        // Compositors that never describe the output still get a popup.
        let output_wait = iced::Task::perform(tokio::time::sleep(OUTPUT_WAIT), |_| {
            cosmic::action::app(Message::OutputUnknown)
        });

        (
            CosmicToast {
                core,
                surface_id: SurfaceId::unique(),
                surface: Surface::Unmapped,
                session: Some(session),
                input_tx: None,
            },
            output_wait,
        )
    }

    fn core(&self) -> &Core {
        &self.core
    }

    fn core_mut(&mut self) -> &mut Core {
        &mut self.core
    }

    fn view(&self) -> Element<'_, Self::Message> {
        empty()
    }

    fn update(&mut self, message: Message) -> Task<Self::Message> {
        match message {
            Message::OutputBounds(screen) => {
                let Some(session) = self.session.as_ref() else {
                    return Task::none();
                };
                if !self.surface.is_unmapped() {
                    return Task::none();
                }
                let geometry = session.geometry_within(&screen);
                let gaps = geometry.edge_gaps(&screen, session.config().border_size);
                tracing::debug!(?screen, ?geometry, "output bounds known");
                return self.show(gaps);
            }
            Message::OutputUnknown => {
                let Some(session) = self.session.as_ref() else {
                    return Task::none();
                };
                if !self.surface.is_unmapped() {
                    return Task::none();
                }
                tracing::warn!("output size unknown, anchoring popup at the configured insets");
                let gaps = session.inset_gaps();
                return self.show(gaps);
            }
            Message::SurfaceShown(id) => {
                if id != self.surface_id {
                    return Task::none();
                }
                if let Some(events) = self.surface.mark_shown() {
                    tracing::debug!("popup shown, starting dismissal race");
                    return self.start_race(events);
                }
            }
            Message::Input(event) => {
                if let Some(tx) = &self.input_tx {
                    _ = tx.send(event);
                }
            }
            Message::Resolved(Some(Ok(outcome))) => {
                tracing::info!(%outcome, "notification closed");
                if let Some(session) = self.session.take() {
                    session.finish(outcome.exit_code());
                }
            }
            Message::Resolved(Some(Err(err))) => {
                self.fail(anyhow::Error::new(err).context(fl!("error-dismissal")));
            }
            Message::Resolved(None) => {
                self.fail(anyhow::anyhow!(fl!("error-watcher")));
            }
        }
        Task::none()
    }

    fn view_window(&self, _: SurfaceId) -> Element<'_, Message> {
        let Some(session) = self.session.as_ref() else {
            return empty();
        };
        let config = session.config();
        let line_height = Length::Fixed(session.line_height() as f32);
        let text_color = color(config.text_color);

        let mut lines = Column::new();
        for (i, line) in session.lines().iter().enumerate() {
            let (font, size) = if i == 0 {
                (session.title_font(), config.title_font.size)
            } else {
                (session.body_font(), config.body_font.size)
            };
            if i > 0 {
                lines = lines.push(vertical_space().height(Length::Fixed(config.line_spacing as f32)));
            }
            lines = lines.push(
                container(
                    text::body(line.text())
                        .font(font)
                        .size(f32::from(size))
                        .class(cosmic::theme::Text::Color(text_color)),
                )
                .height(line_height),
            );
            if i == 0 {
                lines = lines.push(vertical_space().height(Length::Fixed(config.padding as f32)));
            }
        }

        let outer = session.outer_size();
        let background = color(config.background);
        let border = Border {
            color: color(config.border_color),
            width: config.border_size as f32,
            radius: 0.0.into(),
        };

        container(lines)
            .padding((config.border_size + config.padding) as f32)
            .width(Length::Fixed(outer.width as f32))
            .height(Length::Fixed(outer.height as f32))
            .class(cosmic::theme::Container::custom(move |_| iced_container::Style {
                background: Some(iced::Background::Color(background)),
                border,
                ..Default::default()
            }))
            .into()
    }

    fn subscription(&self) -> Subscription<Message> {
        event::listen_with(surface_message)
    }
}

fn surface_message(
    event: iced::Event,
    _status: event::Status,
    id: SurfaceId,
) -> Option<Message> {
    match event {
        iced::Event::Mouse(mouse::Event::ButtonPressed(button)) => {
            Some(Message::Input(InputEvent::ButtonPressed(pointer_button(button))))
        }
        iced::Event::Keyboard(keyboard::Event::KeyPressed { key, .. }) => {
            Some(Message::Input(InputEvent::KeyPressed(key_of(&key))))
        }
        iced::Event::Window(window::Event::Opened { .. } | window::Event::Resized(..)) => {
            Some(Message::SurfaceShown(id))
        }
        iced::Event::PlatformSpecific(PlatformSpecific::Wayland(WaylandEvent::Output(
            output,
            _,
        ))) => output_bounds(&output).map(Message::OutputBounds),
        _ => None,
    }
}

fn empty<'a>() -> Element<'a, Message> {
    container(vertical_space().height(Length::Fixed(1.0)))
        .center_x(Length::Fixed(1.0))
        .center_y(Length::Fixed(1.0))
        .into()
}

fn color(rgba: Rgba) -> Color {
    Color::from_rgba8(rgba.r(), rgba.g(), rgba.b(), rgba.alpha())
}

fn corner_anchor(corner: Corner) -> Anchor {
    let vertical = if corner.is_top() {
        Anchor::TOP
    } else {
        Anchor::BOTTOM
    };
    let horizontal = if corner.is_left() {
        Anchor::LEFT
    } else {
        Anchor::RIGHT
    };
    vertical.union(horizontal)
}

/// Margins for the two anchored edges; the others are ignored by the
/// compositor and left at zero.
fn corner_margin(corner: Corner, gaps: EdgeGaps) -> IcedMargin {
    IcedMargin {
        top: if corner.is_top() { gaps.top } else { 0 },
        right: if corner.is_left() { 0 } else { gaps.right },
        bottom: if corner.is_top() { 0 } else { gaps.bottom },
        left: if corner.is_left() { gaps.left } else { 0 },
    }
}

fn output_bounds(event: &OutputEvent) -> Option<ScreenBounds> {
    match event {
        OutputEvent::Created(Some(info)) | OutputEvent::InfoUpdate(info) => info
            .logical_size
            .map(|(width, height)| ScreenBounds::from_size(width, height)),
        _ => None,
    }
}

fn pointer_button(button: mouse::Button) -> PointerButton {
    match button {
        mouse::Button::Left => PointerButton::Primary,
        mouse::Button::Middle => PointerButton::Middle,
        mouse::Button::Right => PointerButton::Secondary,
        mouse::Button::Back => PointerButton::Other(8),
        mouse::Button::Forward => PointerButton::Other(9),
        mouse::Button::Other(code) => PointerButton::Other(code),
    }
}

fn key_of(key: &keyboard::Key) -> Key {
    match key {
        keyboard::Key::Character(c) => {
            let mut chars = c.chars();
            match (chars.next(), chars.next()) {
                (Some(ch), None) => Key::Character(ch),
                _ => Key::Other,
            }
        }
        keyboard::Key::Named(keyboard::key::Named::Delete) => Key::Delete,
        keyboard::Key::Named(keyboard::key::Named::Escape) => Key::Escape,
        _ => Key::Other,
    }
}
