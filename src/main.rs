use bulk_rename::BulkRenameError;
use bulk_rename::cli;

mod app;
mod logging;

fn main() {
    let args = cli::parse();
    if let Err(e) = app::run(args) {
        let status = e
            .downcast_ref::<BulkRenameError>()
            .map(BulkRenameError::exit_status)
            .unwrap_or(1);
        std::process::exit(status);
    }
}
