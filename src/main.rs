//! Binary entrypoint for the EtherPet CLI.
//!
//! Commands:
//! - `init` - write a starter `config.toml`
//! - `adopt --name <name> --species <species>` - adopt a companion
//! - `feed [basic|premium]`, `play [low|medium|high]`, `clean`, `sleep [nap|sleep]`,
//!   `room <room>` - care actions
//! - `status` - gauges, mood and needs; `actions` - what the current room offers
//! - `species` - list the species to choose from
//! - `watch` - stay running, apply decay every tick and take care commands
//!   typed on stdin until `quit` or Ctrl-C
//! - `export [--out <file>]`, `import <file>` - move a save in or out
//! - `reset --yes` - release the companion and delete the save
//!
//! See the library crate docs for module‑level details: `etherpet::`.
use anyhow::{anyhow, bail, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use log::info;

use etherpet::caretaker::{until_signal, Caretaker, SessionEvent};
use etherpet::config::Config;
use etherpet::pet::{
    available_items, format_room_navigation, room_title, species_info, ActionOutcome, CareAction,
    FoodTier, GaugeBand, Pet, PetError, PlayIntensity, Room, SleepDuration, Species,
};
use etherpet::storage::SaveStore;

#[derive(Parser)]
#[command(name = "etherpet")]
#[command(about = "Care for a virtual cosmic companion from the terminal")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path (can be used before or after subcommand)
    #[arg(short, long, default_value = "config.toml", global = true)]
    config: String,

    /// Verbose logging (-v, -vv for more; may appear before or after subcommand)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default configuration file
    Init,
    /// Adopt a new companion
    Adopt {
        /// Companion name (up to 20 characters)
        #[arg(short, long)]
        name: String,
        /// One of: nebula, stardust, cosmos, nova
        #[arg(short, long)]
        species: Species,
    },
    /// Feed your companion
    Feed {
        #[arg(default_value = "basic")]
        food: FoodTier,
    },
    /// Play with your companion
    Play {
        #[arg(default_value = "medium")]
        intensity: PlayIntensity,
    },
    /// Give your companion a bath
    Clean,
    /// Let your companion rest
    Sleep {
        #[arg(default_value = "nap")]
        duration: SleepDuration,
    },
    /// Move to another room
    Room { room: Room },
    /// Show gauges, mood and needs
    Status,
    /// List the items in the current room
    Actions,
    /// List the available species
    Species,
    /// Keep running: decay on every tick, care commands from stdin, until quit or Ctrl-C
    Watch,
    /// Print the save as JSON
    Export {
        /// Write to this file instead of stdout
        #[arg(short, long)]
        out: Option<String>,
    },
    /// Replace the save with a JSON file
    Import { file: String },
    /// Release your companion and delete the save
    Reset {
        /// Confirm; the companion cannot be recovered
        #[arg(long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Commands::Init = cli.command {
        init_logging(&Config::default(), cli.verbose);
        Config::create_default(&cli.config).await?;
        info!("Configuration file created at {}", cli.config);
        return Ok(());
    }

    let config = Config::load_or_default(&cli.config).await?;
    init_logging(&config, cli.verbose);

    if let Commands::Species = cli.command {
        for species in Species::ALL {
            let info = species_info(*species);
            println!(
                "{} {:<9} {}",
                info.emoji,
                species.as_str(),
                info.description
            );
        }
        return Ok(());
    }

    let save_path = config.storage.save_path();
    let store = SaveStore::open(&save_path).map_err(|e| {
        anyhow!(
            "Failed to open save at {}: {} (is `etherpet watch` running? type commands there)",
            save_path.display(),
            e
        )
    })?;
    let mut caretaker = Caretaker::open(store, Utc::now())?;

    let action = match cli.command {
        Commands::Feed { food } => Some(CareAction::Feed { food }),
        Commands::Play { intensity } => Some(CareAction::Play { intensity }),
        Commands::Clean => Some(CareAction::Clean),
        Commands::Sleep { duration } => Some(CareAction::Sleep { duration }),
        Commands::Room { room } => Some(CareAction::ChangeRoom { room }),
        _ => None,
    };
    if let Some(action) = action {
        return care(&mut caretaker, action);
    }

    match cli.command {
        Commands::Adopt { name, species } => {
            let pet = caretaker.adopt(&name, species, Utc::now())?;
            let info = species_info(species);
            println!(
                "{} Welcome home, {} the {}!",
                info.emoji,
                pet.name(),
                info.display_name
            );
            print_status(pet);
        }
        Commands::Status => print_status(require_pet(&caretaker)?),
        Commands::Actions => {
            let pet = require_pet(&caretaker)?;
            print!("{}", format_room_navigation(pet.current_room(), pet.unlocked()));
            println!("\nIn the {}:", room_title(pet.current_room()));
            for item in available_items(pet.current_room(), pet.unlocked()) {
                println!("  {:<11} {}", item.label, item.action);
            }
        }
        Commands::Watch => {
            let pet = require_pet(&caretaker)?;
            print_status(pet);
            println!("Type feed, play, clean, sleep, room <room>, status or quit.");
            let period = config.caretaker.tick_interval();
            info!("watching; ticking every {}s", period.as_secs());
            let input = tokio::io::BufReader::new(tokio::io::stdin());
            caretaker
                .run_session(
                    period,
                    input,
                    until_signal(tokio::signal::ctrl_c()),
                    |c, event| {
                        match event {
                            SessionEvent::Acted(outcome) => print_outcome(outcome),
                            SessionEvent::Rejected(reason) => {
                                eprintln!("{}", reason);
                                return;
                            }
                            SessionEvent::Decayed { .. } | SessionEvent::Status => {}
                        }
                        if let Some(pet) = c.pet() {
                            print_status(pet);
                        }
                    },
                )
                .await?;
        }
        Commands::Export { out } => {
            let Some(json) = caretaker.store().export_json()? else {
                bail!("nothing to export: no companion has been adopted yet");
            };
            match out {
                Some(path) => {
                    tokio::fs::write(&path, json).await?;
                    info!("save exported to {}", path);
                }
                None => println!("{}", json),
            }
        }
        Commands::Import { file } => {
            if caretaker.has_companion() {
                bail!("a companion already lives here; run `etherpet reset --yes` first");
            }
            let json = tokio::fs::read_to_string(&file).await?;
            let pet = caretaker.store().import_json(&json, Utc::now())?;
            println!("Imported {} from {}", pet.name(), file);
            print_status(&pet);
        }
        Commands::Reset { yes } => {
            if !yes {
                bail!("this cannot be undone; re-run with --yes to release your companion");
            }
            match caretaker.release()? {
                Some(pet) => println!("Goodbye, {}! 👋", pet.name()),
                None => println!("There was no companion to release."),
            }
        }
        Commands::Init
        | Commands::Species
        | Commands::Feed { .. }
        | Commands::Play { .. }
        | Commands::Clean
        | Commands::Sleep { .. }
        | Commands::Room { .. } => unreachable!("handled above"),
    }

    Ok(())
}

fn care(caretaker: &mut Caretaker, action: CareAction) -> Result<()> {
    let (outcome, _) = match caretaker.perform(action, Utc::now()) {
        Ok(result) => result,
        Err(PetError::NoCompanion) => bail!(no_companion_hint()),
        Err(e) => return Err(e.into()),
    };
    print_outcome(&outcome);
    // always re-read after an action
    if let Some(pet) = caretaker.pet() {
        print_status(pet);
    }
    if !outcome.success {
        std::process::exit(2);
    }
    Ok(())
}

fn print_outcome(outcome: &ActionOutcome) {
    match outcome.coins {
        Some(coins) => println!("{} (+{} coins)", outcome.message, coins),
        None => println!("{}", outcome.message),
    }
}

fn require_pet(caretaker: &Caretaker) -> Result<&Pet> {
    match caretaker.pet() {
        Some(pet) => Ok(pet),
        None => bail!(no_companion_hint()),
    }
}

fn no_companion_hint() -> String {
    "no companion yet; adopt one with `etherpet adopt --name <name> --species <species>` \
     (see `etherpet species`)"
        .to_string()
}

fn print_status(pet: &Pet) {
    let stats = pet.stats();
    let status = pet.status();
    let info = species_info(pet.species());

    println!(
        "=== {} {} ===\n{} | Level {} ({}/{} xp) | {} coins | {}",
        info.emoji,
        pet.name(),
        info.display_name,
        stats.level,
        stats.experience,
        stats.experience_to_next(),
        stats.coins,
        room_title(pet.current_room())
    );
    for (label, value) in stats.gauges() {
        let flag = match GaugeBand::of(value) {
            GaugeBand::Good => "",
            GaugeBand::Fair => " ~",
            GaugeBand::Low => " !",
        };
        let bar = "█".repeat((value / 10.0).round() as usize);
        println!("{:<10} {:>3.0}% {:<10}{}", label, value, bar, flag);
    }
    println!("Mood: {}", status.mood);
    if !status.needs_attention.is_empty() {
        let needs: Vec<_> = status.needs_attention.iter().map(|n| n.as_str()).collect();
        println!("Needs attention: {}", needs.join(", "));
    }
    println!("\"{}\"", status.message);
}

fn init_logging(config: &Config, verbosity: u8) {
    use std::io::Write;
    let mut builder = env_logger::Builder::new();
    // CLI verbosity overrides the configured level
    let base_level = match verbosity {
        0 => config.logging.level_filter(),
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    builder.filter_level(base_level);
    if let Some(ref file) = config.logging.file {
        if let Ok(f) = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(file)
        {
            let write_mutex = std::sync::Arc::new(std::sync::Mutex::new(f));

            // Echo to the console only when someone is watching it
            let is_tty = atty::is(atty::Stream::Stdout);

            builder.format(move |fmt, record| {
                let ts = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
                let line = format!("{} [{}] {}", ts, record.level(), record.args());

                if let Ok(mut guard) = write_mutex.lock() {
                    let _ = writeln!(guard, "{}", line);
                }

                if is_tty {
                    writeln!(fmt, "{}", line)
                } else {
                    Ok(())
                }
            });
            let _ = builder.try_init();
            return;
        }
    }
    builder.format(|fmt, record| {
        writeln!(
            fmt,
            "{} [{}] {}",
            chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ"),
            record.level(),
            record.args()
        )
    });
    let _ = builder.try_init();
}
