//! Export every frame of an ASE file as a PAM image.
//!
//! PAM (Netpbm "portable arbitrary map") carries RGBA without an
//! encoder dependency; most image tools can convert it onwards.

extern crate ase;

use std::env;
use std::fs::File;
use std::io::Write;
use std::process;

use ase::AseFile;

fn main() {
    let args: Vec<String> = env::args().collect();
    if args.len() != 2 {
        eprintln!("usage: ase2pam <file.aseprite>");
        process::exit(1);
    }

    if let Err(e) = export(&args[1]) {
        eprintln!("Error - {}", e);
        process::exit(1);
    }
}

fn export(filename: &str)
        -> Result<(), Box<dyn std::error::Error>> {
    let doc = AseFile::read(File::open(filename)?)?;

    for (idx, frame) in doc.export_sequence()?.iter().enumerate() {
        let name = format!("frame_{:04}.pam", idx);
        let mut out = File::create(&name)?;

        write!(out, "P7\nWIDTH {}\nHEIGHT {}\nDEPTH 4\nMAXVAL 255\n\
                TUPLTYPE RGB_ALPHA\nENDHDR\n",
                frame.raster.w, frame.raster.h)?;
        out.write_all(&frame.raster.buf)?;

        println!("{} ({} ms)", name, frame.duration_ms);
    }

    Ok(())
}
