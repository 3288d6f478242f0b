//! Fixed-point codec round trip.

use clap::Args;
use fixsim_core::{BitWidth, dequantize, quantize};

#[derive(Args)]
pub struct QuantizeArgs {
    /// Values to quantize
    #[arg(value_name = "VALUE", required = true, allow_negative_numbers = true)]
    values: Vec<f64>,

    /// Word width in bits (2-32)
    #[arg(short, long, default_value = "16")]
    bits: u32,
}

pub fn run(args: QuantizeArgs) -> anyhow::Result<()> {
    let bits = BitWidth::new(args.bits)?;

    println!(
        "{}-bit fixed point: scale {}, LSB {:e}",
        bits.bits(),
        bits.scale(),
        bits.lsb()
    );
    println!(
        "\n{:>14} {:>14} {:>14} {:>12}",
        "Value", "Integer", "Dequantized", "Error"
    );
    for value in args.values {
        let q = quantize(value, bits);
        let back = dequantize(q, bits);
        println!("{value:>14.8} {q:>14} {back:>14.8} {:>12.3e}", back - value);
    }

    Ok(())
}
