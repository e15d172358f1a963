//! Embeds build metadata answered by the `Q1` TCODE query.

use time::OffsetDateTime;
use time::macros::format_description;

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    let date = OffsetDateTime::now_utc()
        .format(format_description!("[year]-[month]-[day]"))
        .unwrap_or_else(|_| String::from("unknown"));
    println!("cargo:rustc-env=BAKESIM_BUILD_DATE={date}");

    let builder = std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .unwrap_or_else(|_| String::from("unknown"));
    println!("cargo:rustc-env=BAKESIM_BUILDER={builder}");
}
