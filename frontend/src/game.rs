use crate::api::HttpApi;
use crate::timer::GlooPacer;
use chopsticks_web::{ClientConfig, Indicator, Session, TurnError, View};
use common::{Affordance, DisplayModel, Gesture, PlayerNum, PlayerView};
use std::fmt;
use std::rc::Rc;
use tracing::{debug, warn};
use wasm_bindgen_futures::spawn_local;
use yew::html::Scope;
use yew::prelude::*;

type GameSession = Session<HttpApi, GlooPacer, LinkView>;

#[derive(Debug, Clone)]
pub enum Message {
    Render(DisplayModel),
    Indicate(Indicator),
    Play(Gesture),
    Restart,
    Reload,
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Message::Render(_) => write!(f, "Render"),
            Message::Indicate(indicator) => write!(f, "Indicate: {:?}", indicator),
            Message::Play(gesture) => write!(f, "Play: {:?}", gesture),
            Message::Restart => write!(f, "Restart"),
            Message::Reload => write!(f, "Reload"),
        }
    }
}

#[derive(Properties, PartialEq, Default)]
pub struct GameProps {
    #[prop_or_default]
    pub config: ClientConfig,
}

// Forwards session output to the component as messages
pub struct LinkView {
    link: Scope<Game>,
}

impl View for LinkView {
    fn render(&self, model: &DisplayModel) {
        self.link.send_message(Message::Render(model.clone()));
    }

    fn indicate(&self, indicator: &Indicator) {
        self.link.send_message(Message::Indicate(indicator.clone()));
    }
}

pub struct Game {
    session: Rc<GameSession>,
    model: Option<DisplayModel>,
    indicator: Indicator,
}

impl Component for Game {
    type Message = Message;
    type Properties = GameProps;

    fn create(ctx: &Context<Self>) -> Self {
        let config = &ctx.props().config;
        let view = LinkView {
            link: ctx.link().clone(),
        };
        let session = Rc::new(Session::new(
            HttpApi::new(config.base_url.clone()),
            GlooPacer,
            view,
            config,
        ));
        spawn_load(session.clone());
        Self {
            session,
            model: None,
            indicator: Indicator::Clear,
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        debug!("{}", msg);
        match msg {
            Message::Render(model) => {
                self.model = Some(model);
                true
            }
            Message::Indicate(indicator) => {
                self.indicator = indicator;
                true
            }
            Message::Play(gesture) => {
                let session = self.session.clone();
                spawn_local(async move {
                    report(session.play(gesture).await);
                });
                false
            }
            Message::Restart => {
                let session = self.session.clone();
                spawn_local(async move {
                    report(session.restart().await);
                });
                false
            }
            Message::Reload => {
                spawn_load(self.session.clone());
                false
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        match &self.model {
            None => {
                let onclick_reload = ctx.link().callback(|_| Message::Reload);
                html! {
                    <section id="page">
                        <div class={classes!("status")}>{"Loading game..."}</div>
                        { view_indicator(&self.indicator) }
                        if matches!(self.indicator, Indicator::Error(_)) {
                            <button class={classes!("reload")} onclick={onclick_reload}>{"Reload"}</button>
                        }
                    </section>
                }
            }
            Some(model) => view_game(ctx, model, &self.indicator),
        }
    }

    fn destroy(&mut self, _ctx: &Context<Self>) {
        self.session.teardown();
    }
}

fn spawn_load(session: Rc<GameSession>) {
    spawn_local(async move {
        if let Err(err) = session.load().await {
            warn!("load failed: {}", err);
        }
    });
}

fn report(result: Result<(), TurnError>) {
    match result {
        Ok(()) => {}
        Err(TurnError::TornDown) => debug!("turn abandoned after teardown"),
        Err(err) => warn!("turn ended with error: {}", err),
    }
}

fn view_game(ctx: &Context<Game>, model: &DisplayModel, indicator: &Indicator) -> Html {
    let onclick_restart = ctx.link().callback(|_| Message::Restart);
    html! {
        <section id="page">
            <div class={classes!("players")}>
                { for model.players.iter().map(view_player) }
            </div>
            <div class={classes!("status")}>{ model.status.clone() }</div>
            { view_indicator(indicator) }
            <div class={classes!("moves")}>
                {
                    model.affordances.iter()
                        .map(|affordance| view_affordance(ctx, affordance, model.moves_enabled))
                        .collect::<Html>()
                }
            </div>
            <button class={classes!("restart")} onclick={onclick_restart} disabled={!model.moves_enabled}>
                {"New game"}
            </button>
        </section>
    }
}

fn view_player(player: &PlayerView) -> Html {
    let class = match player.player {
        PlayerNum::Human => "human",
        PlayerNum::Opponent => "bot",
    };
    html! {
        <div class={classes!("player", class)}>
            <h2>{ player.label.to_string() }</h2>
            <div class={classes!("hands")}>
                {
                    player.hands.iter().map(|fingers| html! {
                        <div class={if *fingers == 0 { classes!("hand", "dead") } else { classes!("hand") }}>
                            { fingers.to_string() }
                        </div>
                    }).collect::<Html>()
                }
            </div>
        </div>
    }
}

// The gesture is captured in the button's callback and encoded by the session
// against the state current at click time
fn view_affordance(ctx: &Context<Game>, affordance: &Affordance, enabled: bool) -> Html {
    let gesture = affordance.gesture;
    let onclick = ctx.link().callback(move |_| Message::Play(gesture));
    let class = match gesture {
        Gesture::Hit { .. } => "hit",
        Gesture::Split { .. } => "split",
    };
    html! {
        <button
            class={classes!("move", class)}
            title={affordance.command.to_wire()}
            {onclick}
            disabled={!enabled}>
            { affordance.label.clone() }
        </button>
    }
}

fn view_indicator(indicator: &Indicator) -> Html {
    match indicator {
        Indicator::Clear => html! {},
        Indicator::WaitingForOpponent => html! {
            <div class={classes!("indicator", "waiting")}>{"Waiting for the bot..."}</div>
        },
        Indicator::Error(reason) => html! {
            <div class={classes!("indicator", "error")}>{ reason.clone() }</div>
        },
    }
}
