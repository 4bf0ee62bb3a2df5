use clap::Parser;

use gsm_core::{BitBuffer, debug};

mod parsers;
use parsers::l3::L3Parser;
use parsers::rlcmac::RlcMacParser;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "GSM Raw PDU Decoder",
    long_about = "Decodes a raw hex string (or bitstring) as an L3 message or RLC/MAC block"
)]
struct Args {
    /// Direction: uplink or downlink
    #[arg(help = "Direction: [ ul | dl ]")]
    direction: String,

    /// Layer the PDU belongs to
    #[arg(help = "Layer: [ l3 | rlcmac ]")]
    layer: String,

    /// Raw PDU to decode
    #[arg(help = "Raw PDU as hex octets, whitespace ignored")]
    data: String,

    #[arg(short = 'b', long = "bits", help = "Interpret data as a bitstring instead of hex")]
    bits: bool,

    #[arg(short = 'v', long = "verbose", help = "Trace codec internals")]
    verbose: bool,
}

fn main() {
    eprintln!("[+] GSM PDU Decoding tool");

    let args = Args::parse();

    let _guard = if args.verbose {
        debug::setup_logging_verbose();
        None
    } else {
        debug::setup_logging_default(None)
    };

    let is_downlink = match args.direction.to_lowercase().as_str() {
        "ul" | "uplink" => false,
        "dl" | "downlink" => true,
        _ => {
            eprintln!("Error: Unsupported direction '{}'. Use: ul, dl", args.direction);
            std::process::exit(1);
        }
    };

    let pdu = if args.bits {
        BitBuffer::from_bitstr(args.data.as_str())
    } else {
        match BitBuffer::from_hexstr(args.data.as_str()) {
            Ok(buf) => buf,
            Err(e) => {
                eprintln!("Error: Invalid hex input: {}", e);
                std::process::exit(1);
            }
        }
    };

    match args.layer.to_lowercase().as_str() {
        "l3" => {
            if is_downlink {
                L3Parser::parse_dl(pdu);
            } else {
                L3Parser::parse_ul(pdu);
            }
        }
        "rlcmac" | "rlc/mac" => {
            if is_downlink {
                RlcMacParser::parse_dl(pdu);
            } else {
                RlcMacParser::parse_ul(pdu);
            }
        }
        _ => {
            eprintln!("Error: Unsupported layer '{}'", args.layer);
            eprintln!("Supported: l3 rlcmac");
            std::process::exit(1);
        }
    };
}
