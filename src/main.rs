use tabledeck::ui::app::App;

fn main() {
    tabledeck::logging::init();
    tracing::info!("starting tabledeck");

    dioxus::LaunchBuilder::desktop()
        .with_cfg(
            dioxus::desktop::Config::new().with_window(
                dioxus::desktop::WindowBuilder::new()
                    .with_title("Dynamic Data Table Manager")
                    .with_inner_size(dioxus::desktop::LogicalSize::new(1200.0, 800.0)),
            ),
        )
        .launch(App);
}
