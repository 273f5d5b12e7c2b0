//! Password hash cracker CLI
//!
//! Usage:
//!   cracker 5d41402abc4b2a76b9719d911017c592 md5 dict -w words.txt     # Dictionary attack
//!   cracker <hash> sha256 dict -w words.txt -m                          # With mutations
//!   cracker <hash> sha1 brute -l 5 -c abcdefghijklmnopqrstuvwxyz        # Brute force

use std::process;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use clap::Parser;
use tracing::{warn, Level};

use hash_cracker::{AttackMode, AttackResult, Config, Coordinator, CrackError, TargetHash};

fn main() {
    let config = Config::parse();
    init_logging(config.verbose);

    // Validate configuration
    if let Err(e) = config.validate() {
        eprintln!("{}", e);
        process::exit(1);
    }

    match run(&config) {
        Ok(()) => {}
        Err(CrackError::Interrupted) => {
            eprintln!("\nInterrupted by user.");
            process::exit(130);
        }
        Err(e) => {
            eprintln!("{}", e);
            process::exit(1);
        }
    }
}

fn run(config: &Config) -> Result<(), CrackError> {
    let target = config.target()?;
    let workers = config.worker_count();

    // Print startup info
    println!("Password Hash Cracker");
    println!("=====================");
    println!("Hash:       {} ({})", target.hash(), target.algorithm());
    println!("Mode:       {}", config.mode);
    println!("Workers:    {}", workers);
    println!();

    let coordinator = Coordinator::new(target, workers).with_batch_size(config.batch_size);

    // Set up ctrl-c handler
    ctrlc_handler(coordinator.interrupt_flag());

    let result = match config.mode {
        AttackMode::Dict => {
            let Some(wordlist) = config.wordlist.as_deref() else {
                return Err(hash_cracker::ConfigError::MissingWordlist.into());
            };
            println!(
                "[*] Running dictionary attack with {} workers{}...",
                workers,
                if config.mutate { " (mutations enabled)" } else { "" }
            );
            coordinator.dictionary_attack(wordlist, config.mutate)?
        }
        AttackMode::Brute => {
            println!(
                "[*] Running brute force attack (max length: {})...",
                config.max_length
            );
            let keyspace = Arc::new(config.keyspace()?);
            coordinator.brute_force_attack(keyspace, config.max_length)?
        }
    };

    print_result(&result, &coordinator);
    Ok(())
}

fn print_result(result: &AttackResult, coordinator: &Coordinator<TargetHash>) {
    match result {
        AttackResult::Found(password) => println!("\n[+] Password found: {}", password),
        AttackResult::NotFound => println!("\n[-] Password not found"),
    }

    println!("\n--- Final Statistics ---");
    println!(
        "Candidates tested: {}",
        format_number(coordinator.total_candidates())
    );
    println!(
        "Average speed:     {}/s",
        format_number(coordinator.candidates_per_second() as u64)
    );
    println!("Time elapsed:      {:.2}s", coordinator.elapsed().as_secs_f64());
}

fn format_number(n: u64) -> String {
    if n >= 1_000_000_000 {
        format!("{:.2}B", n as f64 / 1_000_000_000.0)
    } else if n >= 1_000_000 {
        format!("{:.2}M", n as f64 / 1_000_000.0)
    } else if n >= 1_000 {
        format!("{:.2}K", n as f64 / 1_000.0)
    } else {
        n.to_string()
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn ctrlc_handler(interrupt: Arc<AtomicBool>) {
    // only ever stores true, so repeated Ctrl-C presses are harmless
    if let Err(e) = ctrlc::set_handler(move || {
        interrupt.store(true, Ordering::Relaxed);
    }) {
        warn!("Error setting Ctrl-C handler: {}", e);
    }
}
