use iced::keyboard;
use iced::widget::{
    button, center, column, container, opaque, row, scrollable, stack, text, text_editor, Space,
};
use iced::{application, Background, Border, Color, Element, Length, Shadow, Size, Task, Theme};
use time::{OffsetDateTime, UtcOffset};

use crate::api::{ApiError, BackendClient, ProxyListing, VpnReport};
use crate::notify::{Delivery, Notifier};
use crate::status::{ProxyPanel, StatusClass, ToggleOutcome, VpnStatus};
use crate::transcript::{ChatLog, LoadingId, Sender};

#[derive(Clone, Debug)]
pub struct IcedUiLaunchConfig {
    pub backend_url: String,
    pub title: String,
}

struct BenbotApp {
    client: BackendClient,
    title: String,
    composer: text_editor::Content,
    chat: ChatLog,
    vpn: VpnStatus,
    proxies: ProxyPanel,
    alert: Option<String>,
    notifier: Notifier,
    backend_reachable: Option<bool>,
}

#[derive(Clone, Debug)]
enum Message {
    ComposerEdited(text_editor::Action),
    SendPressed,
    ChatSettled(LoadingId, Result<String, ApiError>),
    TestVpnPressed,
    VpnSettled(Result<VpnReport, ApiError>),
    ProxiesPressed,
    ProxiesSettled(Result<ProxyListing, ApiError>),
    HealthChecked(bool),
    CopyTranscript,
    AlertDismissed,
}

pub fn launch_ui(config: IcedUiLaunchConfig) -> iced::Result {
    let boot_config = config.clone();
    application(
        move || {
            let mut state = BenbotApp::new(boot_config.clone());
            // Page-load hook analogue: probe the backend and run the first
            // connectivity check right away.
            state.vpn.begin_test();
            let client = state.client.clone();
            let probe = state.client.clone();
            let boot = Task::batch(vec![
                Task::perform(async move { probe.check_health().await }, Message::HealthChecked),
                Task::perform(async move { client.test_vpn().await }, Message::VpnSettled),
            ]);
            (state, boot)
        },
        update,
        view,
    )
    .title(app_title)
    .theme(app_theme)
    .window(iced::window::Settings {
        size: Size::new(960.0, 680.0),
        min_size: Some(Size::new(640.0, 480.0)),
        ..Default::default()
    })
    .run()
}

fn app_title(state: &BenbotApp) -> String {
    state.title.clone()
}

fn app_theme(_state: &BenbotApp) -> Theme {
    Theme::Dark
}

impl BenbotApp {
    fn new(config: IcedUiLaunchConfig) -> Self {
        Self {
            client: BackendClient::new(&config.backend_url),
            title: config.title,
            composer: text_editor::Content::new(),
            chat: ChatLog::new(),
            vpn: VpnStatus::default(),
            proxies: ProxyPanel::default(),
            alert: None,
            notifier: Notifier::resolve(),
            backend_reachable: None,
        }
    }
}

fn update(state: &mut BenbotApp, message: Message) -> Task<Message> {
    match message {
        Message::ComposerEdited(action) => {
            state.composer.perform(action);
            Task::none()
        }
        Message::SendPressed => {
            let prompt = state.composer.text().trim().to_string();
            if prompt.is_empty() {
                state.alert = Some("Veuillez entrer un message".to_string());
                return Task::none();
            }

            state.chat.push(Sender::User, prompt.clone());
            state.composer = text_editor::Content::new();
            let id = state.chat.add_loading();

            // No mutual exclusion: each in-flight send is correlated by its
            // loading id, and replies append in arrival order.
            let client = state.client.clone();
            Task::perform(async move { client.send_chat(prompt).await }, move |result| {
                Message::ChatSettled(id.clone(), result)
            })
        }
        Message::ChatSettled(id, result) => {
            state.chat.remove_loading(&id);
            match result {
                Ok(reply) => state.chat.push(Sender::Bot, reply),
                Err(ApiError::Application(msg)) => {
                    state.chat.push(Sender::Bot, format!("Erreur: {msg}"));
                }
                Err(ApiError::Transport(msg)) => {
                    tracing::warn!(error = %msg, "chat request failed in transit");
                    state
                        .chat
                        .push(Sender::Bot, format!("Erreur de connexion: {msg}"));
                }
            }
            Task::none()
        }
        Message::TestVpnPressed => {
            state.vpn.begin_test();
            let client = state.client.clone();
            Task::perform(async move { client.test_vpn().await }, Message::VpnSettled)
        }
        Message::VpnSettled(result) => {
            match result {
                Ok(report) => {
                    state.vpn.online(&report.ip, &report.method);
                    if report.method.contains("VPN") {
                        let body = format!("VPN actif avec IP: {}", report.ip);
                        if let Delivery::Fallback(body) = state.notifier.deliver(&body) {
                            state.alert = Some(body);
                        }
                    }
                }
                Err(ApiError::Application(_)) => state.vpn.test_failed(),
                Err(ApiError::Transport(msg)) => {
                    tracing::warn!(error = %msg, "vpn test unreachable");
                    state.vpn.connection_lost();
                }
            }
            Task::none()
        }
        Message::ProxiesPressed => match state.proxies.toggle() {
            ToggleOutcome::FetchAndShow => {
                let client = state.client.clone();
                Task::perform(
                    async move { client.list_proxies().await },
                    Message::ProxiesSettled,
                )
            }
            ToggleOutcome::Hidden => Task::none(),
        },
        Message::ProxiesSettled(result) => {
            match result {
                Ok(listing) => state.proxies.show_listing(&listing.proxies, listing.count),
                Err(ApiError::Application(msg)) => {
                    state.proxies.show_error(format!("Erreur: {msg}"));
                }
                Err(ApiError::Transport(msg)) => {
                    tracing::warn!(error = %msg, "proxy listing unreachable");
                    state.proxies.show_error("Erreur de chargement");
                }
            }
            Task::none()
        }
        Message::HealthChecked(healthy) => {
            state.backend_reachable = Some(healthy);
            Task::none()
        }
        Message::CopyTranscript => iced::clipboard::write(state.chat.to_html()),
        Message::AlertDismissed => {
            state.alert = None;
            Task::none()
        }
    }
}

fn view(state: &BenbotApp) -> Element<'_, Message> {
    let backend_line = match state.backend_reachable {
        None => "Connexion au backend…",
        Some(true) => "Backend accessible",
        Some(false) => "Backend inaccessible",
    };

    let header = row![
        column![text(state.title.clone()).size(28), text("Chat IA").size(14)].spacing(2),
        Space::new().width(Length::Fill),
        text(backend_line).size(14),
    ]
    .spacing(16)
    .width(Length::Fill)
    .align_y(iced::Alignment::Center);

    let status_color = match state.vpn.class {
        StatusClass::Online => Color::from_rgb(0.35, 0.85, 0.45),
        StatusClass::Offline => Color::from_rgb(0.95, 0.45, 0.45),
    };

    let status_card = container(
        row![
            column![
                text(format!("IP: {}", state.vpn.address)).size(15),
                text(state.vpn.label.clone()).size(14).color(status_color),
            ]
            .spacing(4),
            Space::new().width(Length::Fill),
            button("Tester").padding([8, 14]).on_press(Message::TestVpnPressed),
            button(if state.proxies.visible {
                "Masquer les proxies"
            } else {
                "Proxies"
            })
            .padding([8, 14])
            .style(iced::widget::button::secondary)
            .on_press(Message::ProxiesPressed),
        ]
        .spacing(10)
        .align_y(iced::Alignment::Center),
    )
    .padding(12)
    .style(glass_panel)
    .width(Length::Fill);

    let mut body = column![header, status_card].spacing(12);

    if state.proxies.visible {
        let listing = state
            .proxies
            .lines()
            .iter()
            .fold(column!().spacing(4), |col, line| {
                col.push(text(line.clone()).size(14))
            });
        body = body.push(
            container(listing)
                .padding(12)
                .style(glass_panel)
                .width(Length::Fill),
        );
    }

    body = body.push(view_chat(state)).push(view_composer(state));

    let base = container(
        container(body.spacing(12).padding(16).height(Length::Fill))
            .height(Length::Fill)
            .style(glass_shell),
    )
    .width(Length::Fill)
    .height(Length::Fill)
    .center_x(Length::Fill);

    match &state.alert {
        Some(alert) => stack![base, opaque(alert_overlay(alert))].into(),
        None => base.into(),
    }
}

fn view_chat(state: &BenbotApp) -> Element<'_, Message> {
    let list = state
        .chat
        .entries()
        .iter()
        .fold(column!().spacing(10).width(Length::Fill), |col, entry| {
            let bubble = container(
                column![
                    text(format!(
                        "{} • {}",
                        entry.sender.label(),
                        format_local_time(entry.timestamp)
                    ))
                    .size(12),
                    text(entry.text.clone()).size(15),
                ]
                .spacing(6),
            )
            .padding(12)
            .style(match entry.sender {
                Sender::User => glass_user_bubble,
                Sender::Bot => glass_bot_bubble,
            });
            col.push(bubble)
        })
        .push(Space::new().height(12));

    column![
        row![
            text("Conversation").size(14),
            Space::new().width(Length::Fill),
            button(text("Copier la transcription").size(12))
                .padding([6, 10])
                .style(iced::widget::button::secondary)
                .on_press(Message::CopyTranscript),
        ]
        .align_y(iced::Alignment::Center),
        container(
            scrollable(container(list).padding([0, 10]).width(Length::Fill))
                .height(Length::Fill)
                .width(Length::Fill)
                .anchor_bottom()
                .auto_scroll(true)
        )
        .padding(8)
        .style(glass_panel)
        .width(Length::Fill)
        .height(Length::Fill),
    ]
    .spacing(8)
    .height(Length::Fill)
    .into()
}

fn view_composer(state: &BenbotApp) -> Element<'_, Message> {
    // Enter sends; Shift+Enter falls through to the default newline binding.
    let editor = text_editor(&state.composer)
        .placeholder("Écrivez votre message…")
        .height(72)
        .padding(12)
        .on_action(Message::ComposerEdited)
        .key_binding(|press| {
            if matches!(
                press.key,
                keyboard::Key::Named(keyboard::key::Named::Enter)
            ) && !press.modifiers.shift()
            {
                return Some(text_editor::Binding::Custom(Message::SendPressed));
            }
            text_editor::Binding::from_key_press(press)
        });

    row![
        editor,
        button("Envoyer")
            .padding([10, 16])
            .style(iced::widget::button::primary)
            .on_press(Message::SendPressed),
    ]
    .spacing(10)
    .align_y(iced::Alignment::Center)
    .into()
}

fn alert_overlay(alert: &str) -> Element<'_, Message> {
    let card = container(
        column![
            text(alert).size(16),
            button("OK")
                .padding([8, 20])
                .style(iced::widget::button::primary)
                .on_press(Message::AlertDismissed),
        ]
        .spacing(14)
        .align_x(iced::Alignment::Center),
    )
    .padding(24)
    .max_width(420)
    .style(glass_panel);

    center(card)
        .style(|_theme| iced::widget::container::Style {
            text_color: None,
            background: Some(Background::Color(Color::from_rgba(0.0, 0.0, 0.0, 0.55))),
            border: Border::default(),
            shadow: Shadow::default(),
            snap: false,
        })
        .into()
}

fn glass_shell(_theme: &Theme) -> iced::widget::container::Style {
    iced::widget::container::Style {
        text_color: None,
        background: Some(Background::Color(Color::from_rgba(0.07, 0.10, 0.18, 0.65))),
        border: Border {
            radius: 18.0.into(),
            width: 1.0,
            color: Color::from_rgba(1.0, 1.0, 1.0, 0.10),
        },
        shadow: Shadow::default(),
        snap: false,
    }
}

fn glass_panel(_theme: &Theme) -> iced::widget::container::Style {
    iced::widget::container::Style {
        text_color: None,
        background: Some(Background::Color(Color::from_rgba(0.10, 0.14, 0.24, 0.58))),
        border: Border {
            radius: 16.0.into(),
            width: 1.0,
            color: Color::from_rgba(1.0, 1.0, 1.0, 0.12),
        },
        shadow: Shadow::default(),
        snap: false,
    }
}

fn glass_user_bubble(_theme: &Theme) -> iced::widget::container::Style {
    iced::widget::container::Style {
        text_color: Some(Color::WHITE),
        background: Some(Background::Color(Color::from_rgba(0.39, 0.40, 0.95, 0.62))),
        border: Border {
            radius: 16.0.into(),
            width: 1.0,
            color: Color::from_rgba(1.0, 1.0, 1.0, 0.14),
        },
        shadow: Shadow::default(),
        snap: false,
    }
}

fn glass_bot_bubble(_theme: &Theme) -> iced::widget::container::Style {
    iced::widget::container::Style {
        text_color: Some(Color::WHITE),
        background: Some(Background::Color(Color::from_rgba(0.49, 0.23, 0.92, 0.55))),
        border: Border {
            radius: 16.0.into(),
            width: 1.0,
            color: Color::from_rgba(1.0, 1.0, 1.0, 0.14),
        },
        shadow: Shadow::default(),
        snap: false,
    }
}

fn format_local_time(ts: i64) -> String {
    let Ok(utc_dt) = OffsetDateTime::from_unix_timestamp(ts) else {
        return "1970-01-01 00:00:00".to_string();
    };

    let local_offset = UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC);
    let local_dt = utc_dt.to_offset(local_offset);

    format!(
        "{:02}:{:02}:{:02}",
        local_dt.hour(),
        local_dt.minute(),
        local_dt.second()
    )
}
