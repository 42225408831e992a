use anyhow::{Result, anyhow};
use clap::Parser;
use dice_roller::{
    RandomFaces, SessionConfig, Table,
    roll::{DEFAULT_ROLL_DURATION_MS, DEFAULT_TICK_INTERVAL_MS},
    tray::MAX_DICE,
};
use log::info;
use tokio::{
    io::{AsyncBufReadExt, AsyncWriteExt, BufReader, stdin, stdout},
    sync::mpsc,
};

const BUFFER_SIZE: usize = 1024;

/// Rolls dice driven by JSON commands on stdin, one per line.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Number of dice in play (1 to 3)
    #[arg(long, default_value_t = MAX_DICE)]
    dice: usize,

    /// How long a roll animates
    #[arg(long, default_value_t = DEFAULT_ROLL_DURATION_MS)]
    roll_duration_ms: u64,

    /// Time between animation frames
    #[arg(long, default_value_t = DEFAULT_TICK_INTERVAL_MS)]
    tick_interval_ms: u64,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = SessionConfig {
        active_dice: args.dice,
        roll_duration_ms: args.roll_duration_ms,
        tick_interval_ms: args.tick_interval_ms,
    };
    let (to_table_tx, to_table_rx) = mpsc::channel(BUFFER_SIZE);
    let (notify_tx, mut notify_rx) = mpsc::unbounded_channel();
    let mut table = Table::new(config, RandomFaces::thread(), to_table_rx, notify_tx)?;

    let reader = tokio::spawn(async move {
        let mut lines = BufReader::new(stdin()).lines();
        while let Some(line) = lines.next_line().await? {
            if to_table_tx.send(line).await.is_err() {
                break;
            }
        }
        Ok::<_, anyhow::Error>(())
    });

    let printer = tokio::spawn(async move {
        let mut out = stdout();
        while let Some(notification) = notify_rx.recv().await {
            let mut line = serde_json::to_string(&notification)?;
            line.push('\n');
            out.write_all(line.as_bytes()).await?;
            out.flush().await?;
        }
        Ok::<_, anyhow::Error>(())
    });

    info!("Dice roller ready");
    table.run().await;
    drop(table);

    reader
        .await
        .map_err(|err| anyhow!("Input task failed: {err}"))??;
    printer
        .await
        .map_err(|err| anyhow!("Output task failed: {err}"))??;
    Ok(())
}
