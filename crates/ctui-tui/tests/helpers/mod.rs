use ctui_core::test_support::{container_table, image_table, MockExecutor};
use ctui_provider::CommandExecutor;
use ctui_tui::{App, AppContext};
use ratatui::{backend::TestBackend, Terminal};
use std::sync::Arc;

#[allow(dead_code)]
pub const LIST: &[&str] = &["list", "--all"];
#[allow(dead_code)]
pub const IMAGES: &[&str] = &["image", "list"];

/// Mock with one running and one stopped container, plus two images
#[allow(dead_code)]
pub fn scripted_mock() -> Arc<MockExecutor> {
    let mock = MockExecutor::new();
    mock.respond(
        LIST,
        &container_table(&[
            ("abc123", "nginx:latest", "web", "running"),
            ("def456", "postgres:16", "db", "stopped"),
        ]),
    );
    mock.respond(
        IMAGES,
        &image_table(&[
            ("nginx", "latest", "sha256:1111222233334444"),
            ("alpine", "3.19", "sha256:5555666677778888"),
        ]),
    );
    Arc::new(mock)
}

/// App on the loaded container list
#[allow(dead_code)]
pub async fn loaded_app(mock: &Arc<MockExecutor>) -> App {
    loaded_app_with(mock, AppContext::default()).await
}

#[allow(dead_code)]
pub async fn loaded_app_with(mock: &Arc<MockExecutor>, ctx: AppContext) -> App {
    let executor: Arc<dyn CommandExecutor> = mock.clone();
    let mut app = App::new(executor, ctx);
    app.settle().await;
    app
}

/// Render the app to a TestBackend and capture output as a string
#[allow(dead_code)]
pub fn render_app(app: &mut App, width: u16, height: u16) -> String {
    let backend = TestBackend::new(width, height);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| ctui_tui::ui::draw(frame, app))
        .unwrap();
    let buffer = terminal.backend().buffer().clone();
    buffer_to_string(&buffer)
}

/// Convert a ratatui buffer to a string representation
#[allow(dead_code)]
pub fn buffer_to_string(buffer: &ratatui::buffer::Buffer) -> String {
    let mut output = String::new();
    for y in 0..buffer.area.height {
        for x in 0..buffer.area.width {
            let cell = buffer.get(x, y);
            output.push_str(cell.symbol());
        }
        output.push('\n');
    }
    output
}
