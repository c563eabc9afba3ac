mod cli;
mod prompt;
mod render;

use country_screener::error::AppError;

pub fn run() -> Result<(), AppError> {
    cli::run()
}
