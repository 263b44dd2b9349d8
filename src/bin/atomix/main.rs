mod cli;
mod command;
mod console;
mod store;

#[cfg(test)]
#[macro_use]
extern crate quickcheck_macros;

use std::sync::Arc;

use tokio::{io, net};

use atomix::error::{TryExt, WrappedErr};
use atomix::LevelPack;


#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let settings = cli::Settings::from_matches(&cli::app().get_matches())?;

    let levels = tokio::fs::read_to_string(&settings.levels)
        .await
        .map_err(|e| WrappedErr::new("Could not read level pack", e))?
        .parse::<LevelPack>()
        .map_err(|e| WrappedErr::new("Could not parse level pack", e))?;
    levels.get(settings.level)?;
    log::info!("Loaded {} levels from {}", levels.len(), settings.levels.display());
    let levels = Arc::new(levels);

    if let Some(addr) = settings.listen {
        let listener = net::TcpListener::bind(addr).await?;
        log::info!("Listening on {}", listener.local_addr()?);

        loop {
            let (stream, peer) = listener.accept().await?;
            log::info!("Accepting connection from {}", peer);

            tokio::spawn({
                let levels = levels.clone();
                let start = settings.level;
                async move {
                    let (reader, writer) = stream.into_split();
                    console::serve(reader, writer, levels, start, None).await.or_warn("Console failed");
                    log::info!("Connection from {} closed", peer);
                }
            });
        }
    } else {
        let store = settings.save.map(store::FileStore::new);
        console::serve(io::stdin(), io::stdout(), levels, settings.level, store).await?;
    }

    Ok(())
}
