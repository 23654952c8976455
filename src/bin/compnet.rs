use channel_codes::cs::ecc::{
    BitSequence, ChipCode, ChipCodec, CrcEngine, EncodedSignal, HammingEncoder,
};
use channel_codes::Result;
use clap::{Parser, Subcommand};
use log::{error, info};
use std::process;

/// Worked examples of classical channel codes
#[derive(Parser, Debug)]
#[command(name = "compnet")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Runs the built-in worked examples when omitted
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Spread data bits with a device chip code
    CdmaEncode {
        /// Chip code, e.g. "(1,-1,1,1)"
        code: String,

        /// Data bits as 1 and -1 (or 0), e.g. "(1,-1,-1)"
        data: String,
    },

    /// Recover data bits from a received chip stream
    CdmaDecode {
        /// Chip code of the device to listen to
        code: String,

        /// Received chips, e.g. "(1,1,-1,1,1,-1,1,-1)"
        signal: String,

        /// Reject signals that are not a whole number of chip groups
        #[arg(long)]
        strict: bool,
    },

    /// Compute a CRC remainder by long division
    Crc {
        /// Data bits, e.g. "100110101111010010001"
        data: String,

        /// Generator polynomial bits, e.g. "1011"
        generator: String,

        /// Print the long division
        #[arg(short, long)]
        trace: bool,
    },

    /// Generate a Hamming codeword
    Hamming {
        /// Data bits, e.g. "1011"
        data: String,

        /// Print how each parity bit is set
        #[arg(short, long)]
        trace: bool,
    },

    /// Run the built-in worked examples
    Demo,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Demo);

    if let Err(e) = run(command) {
        error!("{}", e);
        eprintln!("error: {}", e);
        process::exit(1);
    }
}

fn run(command: Commands) -> Result<()> {
    match command {
        Commands::CdmaEncode { code, data } => cdma_encode(&code, &data),
        Commands::CdmaDecode {
            code,
            signal,
            strict,
        } => cdma_decode(&code, &signal, strict),
        Commands::Crc {
            data,
            generator,
            trace,
        } => crc(&data, &generator, trace),
        Commands::Hamming { data, trace } => hamming(&data, trace),
        Commands::Demo => demo(),
    }
}

fn cdma_encode(code: &str, data: &str) -> Result<()> {
    let codec = ChipCodec::new(code.parse::<ChipCode>()?);
    let data = BitSequence::from_polar(data)?;
    info!("encoding {} bits with code {}", data.len(), codec.code());
    println!("{}", codec.encode(&data));
    Ok(())
}

fn cdma_decode(code: &str, signal: &str, strict: bool) -> Result<()> {
    let codec = ChipCodec::new(code.parse::<ChipCode>()?);
    let signal: EncodedSignal = signal.parse()?;
    let estimate = if strict {
        codec.decode_strict(&signal)?
    } else {
        codec.decode(&signal)
    };
    println!("Raw decode results: {}", estimate.raw_text());
    println!("Final decode results: {}", estimate.sign_text());
    Ok(())
}

fn crc(data: &str, generator: &str, trace: bool) -> Result<()> {
    let engine = CrcEngine::new(generator.parse()?)?;
    let outcome = engine.compute(&data.parse()?);
    if trace {
        print_lines(outcome.trace());
    }
    println!("CRC: {}", outcome.remainder_text());
    Ok(())
}

fn hamming(data: &str, trace: bool) -> Result<()> {
    let outcome = HammingEncoder::new().encode(&data.parse()?);
    if trace {
        print_lines(outcome.trace());
    } else {
        println!("{}", outcome.codeword_text());
    }
    Ok(())
}

fn demo() -> Result<()> {
    cdma_encode("(1,-1,1,1)", "(1, -1, -1)")?;
    cdma_decode("(1,1,-1,1)", "(1,1,-1,1,1,-1,1,-1,1,-1,-1,1)", false)?;
    crc("100110101111010010001", "1011", true)?;
    hamming("1011", true)?;
    hamming("1 0 0 1 0 0 1 0 1 1 1 0 0 0 1", true)?;
    Ok(())
}

fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{}", line);
    }
}
