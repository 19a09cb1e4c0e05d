use yew_diagram_viewport::components::App;

fn main() {
    yew::Renderer::<App>::new().render();
}
