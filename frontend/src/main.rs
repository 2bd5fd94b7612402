use finance_tracker_frontend::components::App;
use finance_tracker_frontend::logging;

fn main() {
    logging::init(logging::default_level());
    yew::Renderer::<App>::new().render();
}
