fn main() {
    let result = bspentityalias::get_config().and_then(|config| {
        config.init_logging();
        bspentityalias::run(config)
    });

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
