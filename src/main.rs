// --- Distribuidor de convocados - Archivo principal ---

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;

use distribuidor::{leer_planilha, logging, output_file_name, run_server, run_with_rng, write_workbook, AppConfig, RunOptions};

#[derive(Parser, Debug)]
#[command(name = "distribuidor")]
#[command(about = "Distribuye candidatos en vagas a partir de una planilla")]
struct Args {
    /// Nivel de log (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Levanta el servidor HTTP (comando por defecto)
    Serve {
        /// Dirección de escucha, por ejemplo 0.0.0.0:8080
        #[arg(long)]
        bind: Option<String>,
    },
    /// Corre una distribución sobre una planilla y escribe el libro de resultados
    Run {
        #[arg(long)]
        input: PathBuf,
        /// Por defecto `distribuicao_<MES>.xlsx` junto a la planilla de entrada
        #[arg(long)]
        output: Option<PathBuf>,
        /// Semilla para que los desempates sean reproducibles
        #[arg(long)]
        seed: Option<u64>,
        /// No repetir presidentes aunque la vaga se quede sin uno
        #[arg(long)]
        no_president_reuse: bool,
    },
}

#[tokio::main]
async fn main() -> distribuidor::Result<()> {
    let args = Args::parse();
    let mut config = AppConfig::from_env()?;
    if let Some(level) = args.log_level {
        config.log_level = level;
    }
    logging::init(&logging::default_filter(&config.log_level));

    match args.command.unwrap_or(Command::Serve { bind: None }) {
        Command::Serve { bind } => {
            if let Some(bind) = bind {
                config.bind = bind;
            }
            println!("=== Distribuidor de convocados (API) ===");
            println!("Iniciando servidor en http://{}", config.bind);
            run_server(config).await?;
        }
        Command::Run { input, output, seed, no_president_reuse } => {
            let options = RunOptions { president_reuse: config.president_reuse && !no_president_reuse };
            let planilha = leer_planilha(&input)?;
            let result = match seed {
                Some(seed) => run_with_rng(&planilha.candidates, &planilha.slots, options, &mut StdRng::seed_from_u64(seed)),
                None => run_with_rng(&planilha.candidates, &planilha.slots, options, &mut rand::thread_rng()),
            };

            let out_path = output.unwrap_or_else(|| {
                let name = output_file_name(chrono::Local::now().date_naive());
                match input.parent() {
                    Some(dir) => dir.join(name),
                    None => PathBuf::from(name),
                }
            });
            write_workbook(&out_path, &result.called, &result.not_called)?;

            let report = &result.report;
            println!("Vagas: {} ({} atendidas, {} omitidas)", report.slots_total, report.slots_filled, report.skipped.len());
            println!("Convocados: {} | Nao convocados: {}", result.called.len(), result.not_called.len());
            println!("Resultado escrito en {}", out_path.display());
        }
    }

    Ok(())
}
