//! FluentOps CLI
//!
//! Usage:
//!   fluentops --text "We are mitigating the outage"   # One-shot audit
//!   fluentops --text "..." --user maria               # Audit + record
//!   fluentops --interactive --user maria --level B2   # Crisis session
//!   fluentops --serve                                 # HTTP API server
//!   fluentops --text "..." --json                     # JSON output

use clap::Parser;
use colored::Colorize;
use std::io::{self, BufRead, Write};

use fluentops::core::lexicon::word_count;
use fluentops::core::{
    run_server, CefrClassifier, LevelingEngine, LevelingStatus, LinguisticAuditor, RecordOutcome,
    SignalExtractor,
};
use fluentops::types::{unit_title, AuditResult, Level, Severity};
use fluentops::VERSION;

#[derive(Parser, Debug)]
#[command(
    name = "fluentops",
    version = VERSION,
    about = "CEFR proficiency audits and adaptive leveling for IT crisis communication",
    long_about = "FluentOps audits written English responses to IT crisis scenarios.\n\n\
                  Each audit detects a CEFR level (B1-C2) from technical verb tiers,\n\
                  false friends, hesitation markers, and soft-skill indicators, then\n\
                  feeds an adaptive leveling system that offers a level-up after three\n\
                  consecutive audits above the registered level.\n\n\
                  Modes:\n  \
                  --text         One-shot audit of a single response\n  \
                  --interactive  Crisis session (audit + record each line)\n  \
                  --serve        HTTP API server mode\n\n\
                  Levels:\n  \
                  B1 - Intermediate        B2 - Upper Intermediate\n  \
                  C1 - Advanced            C2 - Mastery"
)]
struct Args {
    /// Text to audit (one-shot mode)
    #[arg(short, long)]
    text: Option<String>,

    /// Record audits under this user id
    #[arg(short, long)]
    user: Option<String>,

    /// Registered level when the user is first created
    #[arg(short, long)]
    level: Option<Level>,

    /// Interactive crisis session - read lines from stdin
    #[arg(short, long)]
    interactive: bool,

    /// Run as HTTP API server
    #[arg(short, long)]
    serve: bool,

    /// Server address (default: 127.0.0.1:3000)
    #[arg(long, default_value = "127.0.0.1:3000")]
    addr: String,

    /// Output as JSON
    #[arg(long)]
    json: bool,

    /// Disable colors in output
    #[arg(long)]
    no_color: bool,

    /// Show the subscore breakdown
    #[arg(long)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    if args.no_color || args.json {
        colored::control::set_override(false);
    }
    init_tracing(args.verbose);

    if args.serve {
        run_serve(&args).await;
    } else if args.interactive {
        run_interactive(&args);
    } else if let Some(ref text) = args.text {
        run_single(text, &args);
    } else {
        // Default to interactive if no mode specified
        run_interactive(&args);
    }
}

fn init_tracing(verbose: bool) {
    if std::env::var("RUST_LOG").is_err() {
        let level = if verbose { "fluentops=debug" } else { "fluentops=info" };
        std::env::set_var("RUST_LOG", level);
    }
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .without_time()
        .init();
}

/// Run a single one-shot audit
fn run_single(text: &str, args: &Args) {
    let auditor = LinguisticAuditor::new();
    let result = auditor.audit(text);

    let record = args.user.as_ref().map(|user| {
        let engine = LevelingEngine::new();
        engine.init_user(user, args.level.unwrap_or(Level::B1));
        engine.record_audit(user, &result)
    });

    if args.json {
        match &record {
            Some(outcome) => {
                #[derive(serde::Serialize)]
                struct CliOutput<'a> {
                    audit: &'a AuditResult,
                    record: &'a RecordOutcome,
                }
                let output = CliOutput { audit: &result, record: outcome };
                println!("{}", serde_json::to_string_pretty(&output).unwrap());
            }
            None => println!("{}", serde_json::to_string_pretty(&result).unwrap()),
        }
        return;
    }

    if args.verbose {
        print_verbose(text, &result);
    } else {
        print_report(&result);
    }
    if let Some(outcome) = &record {
        print_record_outcome(outcome);
    }
}

/// Run an interactive crisis session: every line is audited and recorded
fn run_interactive(args: &Args) {
    let auditor = LinguisticAuditor::new();
    let engine = LevelingEngine::new();
    let user = args.user.clone().unwrap_or_else(|| "trainee".to_string());
    engine.init_user(&user, args.level.unwrap_or(Level::B1));

    print_header("Crisis Session");
    println!("Respond to the crisis in English. Every response is audited and recorded.");
    println!("Commands: 'status' shows progress, 'accept' claims a level-up, 'quit' exits.");
    println!();

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        let level = engine.status(&user).registered_level;
        print!("[{}] {} > ", level_badge(level), user);
        stdout.flush().unwrap();

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(_) => break,
        }

        let line = line.trim();
        if line.eq_ignore_ascii_case("quit") || line.eq_ignore_ascii_case("exit") {
            let status = engine.status(&user);
            println!("\nSession ended. Audits recorded: {}", status.total_audits);
            break;
        }
        if line.is_empty() {
            continue;
        }
        if line.eq_ignore_ascii_case("status") {
            print_status(&engine.status(&user));
            continue;
        }
        if line.eq_ignore_ascii_case("accept") {
            accept_pending(&engine, &user);
            continue;
        }

        let result = auditor.audit(line);
        let outcome = engine.record_audit(&user, &result);

        if args.json {
            #[derive(serde::Serialize)]
            struct LineOutput<'a> {
                audit: &'a AuditResult,
                record: &'a RecordOutcome,
            }
            let output = LineOutput { audit: &result, record: &outcome };
            println!("{}", serde_json::to_string(&output).unwrap());
        } else if args.verbose {
            print_verbose(line, &result);
            print_record_outcome(&outcome);
        } else {
            print_line_summary(&result);
            if let Some(notification) = &outcome.promotion.notification {
                println!(
                    "{}",
                    format!(
                        "  🎉 LEVEL UP available: {} → {}! Type 'accept' to claim.",
                        notification.from_level, notification.to_level
                    )
                    .green()
                    .bold()
                );
            }
        }
    }
}

/// Accept the first pending level-up for the session user
fn accept_pending(engine: &LevelingEngine, user: &str) {
    let pending = engine
        .notifications(user)
        .into_iter()
        .find(|n| n.is_pending());
    let notification = match pending {
        Some(notification) => notification,
        None => {
            println!("  No pending level-up. Keep training!");
            return;
        }
    };

    match engine.accept_level_up(user, &notification.id) {
        Ok(outcome) => {
            println!(
                "{}",
                format!(
                    "  🎉 Congratulations! You've been upgraded to {}!",
                    outcome.new_level
                )
                .green()
                .bold()
            );
            for id in &outcome.newly_unlocked {
                if let Some(title) = unit_title(*id) {
                    println!("    Unlocked: {} ({})", title, id);
                }
            }
        }
        Err(err) => println!("  {}", err.to_string().red()),
    }
}

/// Print header
fn print_header(mode: &str) {
    println!("{}", "========================================".bold());
    println!("{}", format!("  FluentOps v{} - {}", VERSION, mode).bold());
    println!("{}", "========================================".bold());
    println!();
}

/// Colored CEFR badge for a level
fn level_badge(level: Level) -> String {
    let code = level.to_string();
    match level {
        Level::B1 => code.yellow().bold().to_string(),
        Level::B2 => code.cyan().bold().to_string(),
        Level::C1 => code.green().bold().to_string(),
        Level::C2 => code.bright_green().bold().to_string(),
    }
}

/// Colored severity tag for a mistake
fn severity_tag(severity: Severity) -> String {
    let tag = format!("[{}]", severity);
    match severity {
        Severity::High => tag.red().to_string(),
        Severity::Medium => tag.yellow().to_string(),
        Severity::Low => tag.dimmed().to_string(),
    }
}

/// Full human-readable audit report
fn print_report(result: &AuditResult) {
    println!();
    println!(
        "  {} {}  ({}% confidence, score {:.1}/10)",
        "Level:".bold(),
        level_badge(result.detected_level),
        result.confidence,
        result.weighted_score
    );

    if result.word_count == 0 {
        println!(
            "  {}",
            "Not enough text to audit. Write a fuller response.".yellow()
        );
        println!();
        return;
    }

    println!(
        "  Words: {} | Complexity: {} | Technical density: {:.1}%",
        result.word_count, result.metrics.sentence_complexity, result.metrics.technical_density
    );
    println!(
        "  Clarity: {:.1}/10 | Soft skills: {:.1}/10 | Hesitation: {} markers ({:.1}%)",
        result.metrics.clarity_score,
        result.soft_skill_score,
        result.hesitation.count,
        result.hesitation.ratio
    );

    let profile = &result.verb_profile;
    println!(
        "  Verb tiers: dominant {} (B1:{} B2:{} C1:{} C2:{})",
        level_badge(profile.dominant),
        profile.b1.len(),
        profile.b2.len(),
        profile.c1.len(),
        profile.c2.len()
    );

    if !result.mistakes.is_empty() {
        println!();
        println!("  {}", "Mistakes".bold());
        for mistake in &result.mistakes {
            println!("    {} {}", severity_tag(mistake.severity), mistake.issue);
            println!("      {}", mistake.suggestion.dimmed());
            if let Some(example) = &mistake.example {
                println!("      {}", example.dimmed());
            }
        }
    }

    if let Some(suggestion) = &result.vocabulary_suggestion {
        println!();
        println!(
            "  {} \"{}\" → \"{}\"",
            "💡 Upgrade:".bold(),
            suggestion.basic_word,
            suggestion.upgrade_word
        );
        println!("      {}", suggestion.example.dimmed());
    }
    println!();
}

/// Report plus the subscore breakdown behind the classification
fn print_verbose(text: &str, result: &AuditResult) {
    print_report(result);
    if result.word_count == 0 {
        return;
    }

    let lower = text.to_lowercase();
    let words = word_count(&lower);
    let signals = SignalExtractor::new().extract(&lower, words);
    let scores = CefrClassifier::new().subscores(&signals, words);

    println!("  {}", "Subscores".bold());
    println!("    verb_tier:     {:>4.1} (w=0.35)", scores.verb_tier);
    println!("    false_friends: {:>4.1} (w=0.25)", scores.false_friends);
    println!("    hesitation:    {:>4.1} (w=0.20)", scores.hesitation);
    println!("    soft_skills:   {:>4.1} (w=0.10)", scores.soft_skills);
    println!("    length:        {:>4.1} (w=0.10)", scores.length);
    println!();
}

/// One-line audit summary for interactive mode
fn print_line_summary(result: &AuditResult) {
    if result.word_count == 0 {
        println!("  {}", "(no words to audit)".dimmed());
        return;
    }
    println!(
        "  {} ({}%) score={:.1} words={} hesitation={:.1}% mistakes={}",
        level_badge(result.detected_level),
        result.confidence,
        result.weighted_score,
        result.word_count,
        result.hesitation.ratio,
        result.mistakes.len()
    );
    if let Some(mistake) = result.mistakes.first() {
        println!("    {} {}", severity_tag(mistake.severity), mistake.issue);
    }
}

/// What recording the audit did to the leveling history
fn print_record_outcome(outcome: &RecordOutcome) {
    println!(
        "  Recorded: {} audit(s) on file | {}",
        outcome.entry_count, outcome.promotion.reason
    );
    if let Some(notification) = &outcome.promotion.notification {
        println!(
            "{}",
            format!(
                "  🎉 LEVEL UP available: {} → {}!",
                notification.from_level, notification.to_level
            )
            .green()
            .bold()
        );
    }
    println!();
}

/// Leveling status panel for the session user
fn print_status(status: &LevelingStatus) {
    println!();
    println!(
        "  {} {} | Level: {} | Audits: {}",
        "User:".bold(),
        status.user_id,
        level_badge(status.registered_level),
        status.total_audits
    );

    let units: Vec<String> = status
        .unlocked_units
        .iter()
        .map(|id| match unit_title(*id) {
            Some(title) => format!("{} {}", id, title),
            None => id.to_string(),
        })
        .collect();
    println!("  Unlocked: {}", units.join(", "));
    println!(
        "  Progress: {}% ({}/{} qualifying) - {}",
        status.progress.percentage,
        status.progress.qualifying_audits,
        status.progress.required_audits,
        status.progress.message
    );
    if status.has_level_up_available {
        println!(
            "  {}",
            "A level-up is waiting. Type 'accept' to claim it.".green()
        );
    }
    println!();
}

/// Run HTTP API server
async fn run_serve(args: &Args) {
    println!();
    println!("{}", "========================================".bold());
    println!("{}", format!("  🎓 FluentOps API Server v{}", VERSION).bold());
    println!("{}", "========================================".bold());
    println!();

    if let Err(e) = run_server(&args.addr).await {
        eprintln!("Server error: {}", e);
        std::process::exit(1);
    }
}
