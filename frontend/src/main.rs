mod api;
mod game;
mod logging;
mod timer;

fn main() {
    logging::init();
    yew::Renderer::<game::Game>::new().render();
}
