//! Print the structure of an ASE file.

extern crate ase;

use std::env;
use std::fs::File;
use std::process;

use ase::{AseFile,Chunk};

fn main() {
    let args: Vec<String> = env::args().collect();
    if args.len() != 2 {
        eprintln!("usage: aseinfo <file.aseprite>");
        process::exit(1);
    }

    let file = match File::open(&args[1]) {
        Ok(file) => file,
        Err(e) => {
            eprintln!("Error opening {} - {}", args[1], e);
            process::exit(1);
        },
    };

    let doc = match AseFile::read(file) {
        Ok(doc) => doc,
        Err(e) => {
            eprintln!("Error reading {} - {}", args[1], e);
            process::exit(1);
        },
    };

    let (w, h) = doc.size();
    println!("{}: {}x{}, {} bpp, {} frame(s)",
            args[1], w, h, doc.color_depth().bits(), doc.frame_count());

    if !doc.palette().is_empty() {
        println!("palette: {} slot(s)", doc.palette().len());
    }
    if let Some(profile) = doc.color_profile() {
        println!("color profile: {:?}", profile.kind);
    }

    println!("layers:");
    for layer in doc.layers() {
        let vis = if layer.is_visible() { ' ' } else { '.' };
        println!("  {}{}{}{}",
                vis,
                "  ".repeat(layer.child_level as usize),
                if layer.is_group() { "+ " } else { "" },
                layer.name);
    }

    for tag in doc.tags() {
        println!("tag {:?}: frames {}..{} ({:?})",
                tag.name, tag.from, tag.to, tag.direction);
    }

    for (idx, frame) in doc.frames().iter().enumerate() {
        let num_cels = frame.chunks.iter()
                .filter(|c| match **c {
                    Chunk::Cel(_) => true,
                    _ => false,
                })
                .count();
        println!("frame {:3}: {:5} ms, {} chunk(s), {} cel(s)",
                idx, frame.duration_ms, frame.chunks.len(), num_cels);
    }
}
