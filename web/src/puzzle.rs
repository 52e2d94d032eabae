use std::collections::VecDeque;

use flechita_core as game;
use gloo::timers::callback::Interval;
use serde::{Deserialize, Serialize};
use yew::prelude::*;

use crate::theme;
use crate::utils::*;

/// Delay between replayed cascade frames. The engine resolves a swap
/// synchronously; pacing is purely presentational.
const STEP_REPLAY_MS: u32 = 350;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub(crate) struct PuzzleSettings {
    grid_size: game::Coord,
    alphabet_size: u8,
    theme_id: String,
}

impl PuzzleSettings {
    fn to_game_settings(&self) -> game::GameSettings {
        game::GameSettings::new(self.grid_size, self.alphabet_size, self.theme_id.clone())
    }
}

impl Default for PuzzleSettings {
    fn default() -> Self {
        let game::GameSettings {
            grid_size,
            alphabet_size,
            theme,
        } = game::GameSettings::default();
        Self {
            grid_size,
            alphabet_size,
            theme_id: theme,
        }
    }
}

impl StorageKey for PuzzleSettings {
    const KEY: &'static str = "flechita:puzzle:v1";
}

/// Marked-then-settled frame sequence for every cascade round, in order.
fn replay_frames(steps: &[game::CascadeStep]) -> VecDeque<game::Grid> {
    let mut frames = VecDeque::with_capacity(steps.len() * 2);
    for step in steps {
        frames.push_back(step.marked.clone());
        frames.push_back(step.settled.clone());
    }
    frames
}

fn cycle_in_range(current: u8, min: u8, max: u8) -> u8 {
    if current >= max { min } else { current + 1 }
}

/// Next theme id in stable (sorted) order, wrapping around.
fn next_theme_id(themes: &game::ThemeRegistry, current: &str) -> String {
    let mut ids: Vec<&str> = themes.ids().collect();
    ids.sort_unstable();
    let index = ids.iter().position(|id| *id == current);
    let next = match index {
        Some(i) => ids[(i + 1) % ids.len()],
        None => ids.first().copied().unwrap_or(current),
    };
    next.to_string()
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    CellClick(game::Coord2),
    ReplayTick,
    NewGame,
    ToggleSettings,
    CycleGridSize,
    CycleAlphabet,
    CycleTheme,
    ToggleColorScheme,
}

#[derive(Properties, Clone, Debug, PartialEq)]
pub(crate) struct PuzzleProps {
    /// Force a seed instead of random
    #[prop_or_default]
    pub seed: Option<u64>,
}

#[derive(Properties, Clone, PartialEq)]
struct CellProps {
    cell: game::Cell,
    glyph: String,
    callback: Callback<game::Coord2>,
}

#[function_component(CellView)]
fn cell_component(props: &CellProps) -> Html {
    let CellProps {
        cell,
        glyph,
        callback,
    } = props.clone();

    let mut class = classes!("cell");
    if cell.selected {
        class.push("selected");
    }
    if cell.matched {
        class.push("matched");
    }

    let onclick = Callback::from(move |_| {
        log::trace!("({}, {}) click", cell.row, cell.col);
        callback.emit(cell.pos());
    });

    html! {
        <td key={cell.uid} {class} {onclick}>{glyph}</td>
    }
}

pub(crate) struct PuzzleView {
    settings: PuzzleSettings,
    themes: game::ThemeRegistry,
    session: Option<game::GameSession>,
    replay: VecDeque<game::Grid>,
    settings_open: bool,
    seed: u64,
    _replay_timer: Option<Interval>,
}

impl PuzzleView {
    fn create_session(&self) -> Option<game::GameSession> {
        match game::GameSession::new(self.settings.to_game_settings(), &self.themes, self.seed) {
            Ok(session) => Some(session),
            Err(err) => {
                log::error!("could not create puzzle session: {}", err);
                None
            }
        }
    }

    fn restart(&mut self) {
        self.replay.clear();
        self._replay_timer = None;
        self.session = self.create_session();
    }

    fn start_replay(&mut self, ctx: &Context<Self>, steps: &[game::CascadeStep]) {
        self.replay = replay_frames(steps);
        if self.replay.is_empty() {
            return;
        }
        let link = ctx.link().clone();
        self._replay_timer = Some(Interval::new(STEP_REPLAY_MS, move || {
            link.send_message(Msg::ReplayTick)
        }));
    }

    fn glyph_for(&self, symbol: game::SymbolId) -> String {
        self.themes
            .get(&self.settings.theme_id)
            .and_then(|theme| theme.symbol(symbol))
            .unwrap_or("·")
            .to_string()
    }

    /// During replay the renderer draws the frame queue, not the live grid.
    fn displayed_grid(&self) -> Option<&game::Grid> {
        self.replay
            .front()
            .or_else(|| self.session.as_ref().map(|session| session.grid()))
    }

    fn is_replaying(&self) -> bool {
        !self.replay.is_empty()
    }

    fn state_class(&self) -> Classes {
        classes!(match &self.session {
            _ if self.is_replaying() => "resolving",
            Some(session) if session.is_over() => "over",
            Some(_) => "in-progress",
            None => "broken",
        })
    }
}

impl Component for PuzzleView {
    type Message = Msg;
    type Properties = PuzzleProps;

    fn create(ctx: &Context<Self>) -> Self {
        let mut view = Self {
            settings: LocalOrDefault::local_or_default(),
            themes: game::ThemeRegistry::builtin(),
            session: None,
            replay: VecDeque::new(),
            settings_open: false,
            seed: ctx.props().seed.unwrap_or_else(js_random_seed),
            _replay_timer: None,
        };
        view.session = view.create_session();
        if view.session.is_none() {
            // A stale or hand-edited stored config must not brick the game.
            view.settings = PuzzleSettings::default();
            view.session = view.create_session();
        }
        view
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::CellClick(coords) => {
                if self.is_replaying() {
                    log::trace!("click during replay ignored");
                    return false;
                }
                let Some(session) = self.session.as_mut() else {
                    return false;
                };
                match session.select(coords) {
                    Ok(outcome) => {
                        log::debug!("select {:?}: {:?}", coords, outcome);
                        if outcome == game::SelectOutcome::Accepted {
                            let steps = session.take_steps();
                            self.start_replay(ctx, &steps);
                        }
                        outcome.has_update()
                    }
                    Err(err) => {
                        log::warn!("select {:?} failed: {}", coords, err);
                        false
                    }
                }
            }
            Msg::ReplayTick => {
                self.replay.pop_front();
                if self.replay.is_empty() {
                    self._replay_timer = None;
                }
                true
            }
            Msg::NewGame => {
                self.seed = js_random_seed();
                self.restart();
                true
            }
            Msg::ToggleSettings => {
                self.settings_open = !self.settings_open;
                true
            }
            Msg::CycleGridSize => {
                self.settings.grid_size = cycle_in_range(
                    self.settings.grid_size,
                    game::MIN_GRID_SIZE,
                    game::MAX_GRID_SIZE,
                );
                self.settings.local_save();
                self.restart();
                true
            }
            Msg::CycleAlphabet => {
                self.settings.alphabet_size = cycle_in_range(
                    self.settings.alphabet_size,
                    game::MIN_ALPHABET_SIZE,
                    game::MAX_ALPHABET_SIZE,
                );
                self.settings.local_save();
                self.restart();
                true
            }
            Msg::CycleTheme => {
                self.settings.theme_id = next_theme_id(&self.themes, &self.settings.theme_id);
                self.settings.local_save();
                self.restart();
                true
            }
            Msg::ToggleColorScheme => {
                theme::Theme::toggle();
                false
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let state_class = self.state_class();
        let (score, level, moves) = self
            .session
            .as_ref()
            .map_or((0, 1, 0), |s| (s.score(), s.level(), s.moves_remaining()));
        let is_over = self.session.as_ref().is_some_and(|s| s.is_over()) && !self.is_replaying();

        let cb_new_game = ctx.link().callback(|e: MouseEvent| {
            e.stop_propagation();
            Msg::NewGame
        });
        let cb_show_settings = ctx.link().callback(|_| Msg::ToggleSettings);

        html! {
            <div class={classes!("flechita-puzzle", state_class)}>
                <small onclick={cb_show_settings}>{"···"}</small>
                <nav>
                    <aside>{format!("♟ {}", moves)}</aside>
                    <span><button class="restart" onclick={cb_new_game}>{"↻"}</button></span>
                    <aside>{format!("Lv{} · {}", level, score)}</aside>
                </nav>
                {
                    match self.displayed_grid() {
                        Some(grid) => self.view_grid(ctx, grid),
                        None => html! { <p class="error">{"Puzzle unavailable"}</p> },
                    }
                }
                {
                    is_over.then(|| html! {
                        <footer class="game-over">
                            {format!("Out of moves! Final score {}", score)}
                        </footer>
                    })
                }
                { self.view_settings(ctx) }
            </div>
        }
    }
}

impl PuzzleView {
    fn view_grid(&self, ctx: &Context<Self>, grid: &game::Grid) -> Html {
        let size = grid.size();
        html! {
            <table class={self.is_replaying().then_some("resolving")}>
                {
                    for (0..size).map(|row| html! {
                        <tr>
                            {
                                for (0..size).map(|col| {
                                    let cell = grid[(row, col)];
                                    let glyph = self.glyph_for(cell.symbol);
                                    let callback = ctx.link().callback(Msg::CellClick);
                                    html! {
                                        <CellView {cell} {glyph} {callback}/>
                                    }
                                })
                            }
                        </tr>
                    })
                }
            </table>
        }
    }

    fn view_settings(&self, ctx: &Context<Self>) -> Html {
        let cb_grid = ctx.link().callback(|_| Msg::CycleGridSize);
        let cb_alphabet = ctx.link().callback(|_| Msg::CycleAlphabet);
        let cb_theme = ctx.link().callback(|_| Msg::CycleTheme);
        let cb_scheme = ctx.link().callback(|_| Msg::ToggleColorScheme);
        let cb_close = ctx.link().callback(|_| Msg::ToggleSettings);

        html! {
            <dialog id="puzzle-settings" open={self.settings_open}>
                <article>
                    <h2>{"Puzzle"}</h2>
                    <ul>
                        <li>
                            <button onclick={cb_grid}>
                                {format!("Grid {0}x{0}", self.settings.grid_size)}
                            </button>
                        </li>
                        <li>
                            <button onclick={cb_alphabet}>
                                {format!("Symbols {}", self.settings.alphabet_size)}
                            </button>
                        </li>
                        <li>
                            <button onclick={cb_theme}>
                                {format!("Theme {}", self.settings.theme_id)}
                            </button>
                        </li>
                        <li><button onclick={cb_scheme}>{"Light/Dark"}</button></li>
                    </ul>
                    <footer>
                        <button onclick={cb_close}>{"Close"}</button>
                    </footer>
                </article>
            </dialog>
        }
    }
}
