use dreamfund::{cli::run_cli, init};

fn main() {
    init();
    if let Err(err) = run_cli() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
