#[tokio::main(flavor = "current_thread")]
async fn main() {
    let args = std::env::args().collect();
    if let Err(e) = sqlgen_cli::run(sqlgen_cli::Dialect::MySql, args).await {
        eprintln!("{e:#}");
        std::process::exit(1);
    }
}
