use massue::error::AppResult;

fn main() -> AppResult<()> {
    massue::entry::run()
}
