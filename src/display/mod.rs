pub mod cards;
pub mod progress;
pub mod shell;
pub mod theme;
pub mod views;

pub use cards::{Card, CardRenderer};
pub use progress::ProgressSpinner;
pub use shell::{APP_TITLE, render_shell};
pub use theme::Theme;
pub use views::{loading_message, render_body, render_page, screen_json};
