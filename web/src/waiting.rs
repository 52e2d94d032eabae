use chrono::prelude::*;
use flechita_protocol::MatchStatus;
use gloo::timers::callback::Interval;
use yew::prelude::*;

use crate::api::ApiClient;
use crate::notify;
use crate::puzzle::PuzzleView;
use crate::suggest::SuggestBar;
use crate::utils::*;

const POLL_INTERVAL_MS: u32 = 4000;

#[derive(Properties, Clone, Debug, PartialEq)]
pub(crate) struct WaitingProps {
    pub user_id: String,
    #[prop_or_default]
    pub seed: Option<u64>,
}

pub(crate) enum Msg {
    PollTick,
    Polled(MatchStatus),
    PollFailed(String),
    SendMessage(String),
}

/// Match-waiting screen: polls the matchmaking API on a fixed interval and
/// keeps the user busy with the puzzle until a match arrives. A failed poll
/// is logged and silently retried on the next tick.
pub(crate) struct WaitingView {
    status: Option<MatchStatus>,
    in_flight: bool,
    waiting_since: DateTime<Utc>,
    _poll: Option<Interval>,
}

impl WaitingView {
    fn is_matched(&self) -> bool {
        self.status.as_ref().is_some_and(MatchStatus::is_matched)
    }

    fn create_poll(ctx: &Context<Self>) -> Interval {
        let link = ctx.link().clone();
        Interval::new(POLL_INTERVAL_MS, move || link.send_message(Msg::PollTick))
    }
}

impl Component for WaitingView {
    type Message = Msg;
    type Properties = WaitingProps;

    fn create(ctx: &Context<Self>) -> Self {
        notify::request_permission();
        ctx.link().send_message(Msg::PollTick);
        Self {
            status: None,
            in_flight: false,
            waiting_since: utc_now(),
            _poll: Some(Self::create_poll(ctx)),
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::PollTick => {
                if !self.in_flight {
                    self.in_flight = true;
                    let user_id = ctx.props().user_id.clone();
                    ctx.link().send_future(async move {
                        match ApiClient::match_status(&user_id).await {
                            Ok(status) => Msg::Polled(status),
                            Err(err) => Msg::PollFailed(err.to_string()),
                        }
                    });
                }
                // redraw anyway so the elapsed-time counter advances
                true
            }
            Msg::Polled(status) => {
                self.in_flight = false;
                let newly_matched = status.is_matched() && !self.is_matched();
                if newly_matched {
                    self._poll = None;
                    let partner = status
                        .partner
                        .as_ref()
                        .map_or("someone", |p| p.display_name.as_str());
                    notify::schedule_notification(
                        "It's a match! 💘",
                        &format!("Say hi to {}", partner),
                    );
                }
                self.status = Some(status);
                true
            }
            Msg::PollFailed(reason) => {
                log::warn!("match status poll failed, retrying: {}", reason);
                self.in_flight = false;
                false
            }
            Msg::SendMessage(text) => {
                // The chat screen owns the message transport; from here we
                // only hand the drafted text over.
                log::info!("handing off message: {}", text);
                false
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        match &self.status {
            Some(status) if status.is_matched() => self.view_matched(ctx, status),
            _ => self.view_waiting(ctx),
        }
    }
}

impl WaitingView {
    fn view_waiting(&self, ctx: &Context<Self>) -> Html {
        let elapsed = format_elapsed((utc_now() - self.waiting_since).num_seconds());
        html! {
            <div class="waiting">
                <header>
                    <h1>{"Looking for your match…"}</h1>
                    <p>{format!("waiting {}", elapsed)}</p>
                </header>
                <section class="minigame">
                    <PuzzleView seed={ctx.props().seed}/>
                </section>
            </div>
        }
    }

    fn view_matched(&self, ctx: &Context<Self>, status: &MatchStatus) -> Html {
        let on_send = ctx.link().callback(Msg::SendMessage);
        let partner_name = status
            .partner
            .as_ref()
            .map_or("your match", |p| p.display_name.as_str());
        let avatar = status
            .partner
            .as_ref()
            .and_then(|p| p.avatar_url.clone());

        html! {
            <div class="matched">
                <header>
                    <h1>{"It's a match! 💘"}</h1>
                    {
                        avatar.map(|url| html! {
                            <img class="avatar" src={url} alt={partner_name.to_string()}/>
                        })
                    }
                    <p>{format!("Break the ice with {}", partner_name)}</p>
                </header>
                <SuggestBar
                    user_id={ctx.props().user_id.clone()}
                    partner_user_id={
                        status.partner.as_ref().map_or_else(String::new, |p| p.user_id.clone())
                    }
                    {on_send}
                />
            </div>
        }
    }
}
