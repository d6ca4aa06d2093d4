// build.rs

use clap::{Arg, Command};
use clap_mangen::Man;
use std::env;
use std::fs;
use std::path::PathBuf;

/// Common argument: upstream frontend
fn frontend_arg() -> Arg {
    Arg::new("frontend")
        .value_parser(["pypi", "cpan", "rubygems"])
        .help("Upstream frontend")
}

fn build_cli() -> Command {
    Command::new("portup")
        .version(env!("CARGO_PKG_VERSION"))
        .author("portup Contributors")
        .about("Update MacPorts Portfiles to new upstream releases with minimal diffs")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("PATH")
                .global(true)
                .help("Configuration file"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(clap::ArgAction::SetTrue)
                .help("Enable debug logging"),
        )
        .subcommand_required(true)
        .subcommand(
            Command::new("update")
                .about("Rewrite a Portfile for a new upstream release")
                .arg(
                    Arg::new("diff")
                        .short('d')
                        .long("diff")
                        .required(true)
                        .value_name("PATH")
                        .help("Package diff describing the old and new release (TOML or JSON)"),
                )
                .arg(frontend_arg().short('f').long("frontend"))
                .arg(Arg::new("ports_dir").long("ports-dir").help("Root of the ports tree"))
                .arg(
                    Arg::new("portfile")
                        .short('p')
                        .long("portfile")
                        .help("Portfile to rewrite"),
                )
                .arg(
                    Arg::new("dry_run")
                        .long("dry-run")
                        .action(clap::ArgAction::SetTrue)
                        .help("Print a unified diff instead of writing the Portfile"),
                ),
        )
        .subcommand(
            Command::new("current-version")
                .about("Show the version of a port currently in the MacPorts tree")
                .arg(frontend_arg().required(true))
                .arg(Arg::new("name").required(true).help("Upstream package name")),
        )
        .subcommand(
            Command::new("cpan-version")
                .about("Convert CPAN versions to MacPorts dotted-decimal form")
                .arg(
                    Arg::new("versions")
                        .required(true)
                        .num_args(1..)
                        .help("Versions to convert"),
                ),
        )
        .subcommand(
            Command::new("completions")
                .about("Generate shell completion scripts")
                .arg(
                    Arg::new("shell")
                        .required(true)
                        .value_parser(["bash", "zsh", "fish", "powershell", "elvish"])
                        .help("Shell type"),
                ),
        )
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    let manifest_dir = match env::var("CARGO_MANIFEST_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(e) => {
            println!("cargo:warning=CARGO_MANIFEST_DIR not set: {}", e);
            return;
        }
    };
    let man_dir = manifest_dir.join("man");

    if let Err(e) = fs::create_dir_all(&man_dir) {
        println!("cargo:warning=Failed to create man directory: {}", e);
        return;
    }

    let man = Man::new(build_cli());
    let mut buffer = Vec::new();

    if let Err(e) = man.render(&mut buffer) {
        println!("cargo:warning=Failed to render man page: {}", e);
        return;
    }

    let man_path = man_dir.join("portup.1");
    if let Err(e) = fs::write(&man_path, buffer) {
        println!("cargo:warning=Failed to write man page: {}", e);
    }
}
