//! Text assets embedded at build time. Every file in `assets/` becomes a
//! `&str` constant named after the file, e.g. `config.toml` -> `CONFIG_TOML`.

include!(env!("ASSETS"));
