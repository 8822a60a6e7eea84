use anyhow::{Context, Result};
use clap::Parser;

use scopelens::cli::{CliArgs, Command, FsLoader};
use scopelens::config::InspectorConfig;
use scopelens::host::MemoryHost;
use scopelens::matcher::ColorSchemeMatcher;
use scopelens::session::InspectorSession;
use scopelens::theme::{self, ThemeRuleSet, BUILTIN_SCHEMES};

/// Demo buffer the `report` subcommand inspects
const DEMO_TEXT: &str = "# compute the answer\nanswer = \"forty two\"\n";

fn main() -> Result<()> {
    scopelens::tracing::init();

    let args = CliArgs::parse();
    match args.command {
        Command::Resolve {
            scheme,
            simulate,
            scopes,
        } => resolve(&scheme, simulate, &scopes),
        Command::Report { scheme } => report(&scheme),
        Command::Schemes => {
            schemes();
            Ok(())
        }
    }
}

fn load(scheme: &str) -> Result<ThemeRuleSet> {
    theme::load_scheme(scheme, &FsLoader)
        .with_context(|| format!("failed to load scheme {:?}", scheme))
}

fn resolve(scheme: &str, simulate: bool, scopes: &[String]) -> Result<()> {
    let rule_set = load(scheme)?;
    let matcher = if simulate {
        ColorSchemeMatcher::simulated(rule_set)
    } else {
        ColorSchemeMatcher::new(rule_set)
    };

    for scope in scopes {
        let style = matcher.resolve(scope);
        println!("{}", scope);
        println!(
            "  foreground: {}  (selector: {:?})",
            style.foreground, style.foreground_selector
        );
        println!(
            "  background: {}  (selector: {:?})",
            style.background, style.background_selector
        );
        println!("  style:      {}", style.style);
    }
    Ok(())
}

fn report(scheme: &str) -> Result<()> {
    let mut host = MemoryHost::new(DEMO_TEXT);
    host.add_scope(0, 21, "source.python comment.line.number-sign");
    host.add_scope(21, 27, "source.python variable.other");
    host.add_scope(30, 41, "source.python string.quoted.double");
    host.syntax = Some("syntax/python.yaml".to_string());
    // Caret in the comment and inside the string
    host.selections = vec![4, 33];

    let mut session = InspectorSession::new(InspectorConfig::full_report());
    session.set_rule_set(load(scheme)?);
    session.evaluate(&mut host);

    if let Some(panel) = &host.panel {
        print!("{}", panel);
    }
    Ok(())
}

fn schemes() {
    for builtin in BUILTIN_SCHEMES {
        match ThemeRuleSet::from_yaml(builtin.yaml) {
            Ok(scheme) => {
                let kind = if scheme.is_dark() { "dark" } else { "light" };
                println!(
                    "{:<12} {} ({}, {} rules)",
                    builtin.id,
                    scheme.name,
                    kind,
                    scheme.rules.len()
                );
            }
            Err(e) => println!("{:<12} <unparsable: {}>", builtin.id, e),
        }
    }
}
