use std::path::Path;
use std::process;

use libcaffstream::api::convert_file;

fn main() {
    env_logger::init();

    // Use std::env for argument parsing
    let mut args = std::env::args().skip(1);
    let caff_path = match args.next() {
        Some(val) => val,
        None => {
            eprintln!("Missing required argument: caff_path");
            print_usage_and_exit();
        }
    };
    let ciff_path = match args.next() {
        Some(val) => val,
        None => {
            eprintln!("Missing required argument: ciff_path");
            print_usage_and_exit();
        }
    };
    if let Some(extra) = args.next() {
        eprintln!("Unknown argument: {}", extra);
        print_usage_and_exit();
    }

    let extraction = match convert_file(Path::new(&caff_path), Path::new(&ciff_path)) {
        Ok(extraction) => extraction,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(1);
        }
    };

    match extraction.image_bytes {
        Some(written) => {
            println!("Declared block count: {}", extraction.header.block_count);
            println!("Wrote {} bytes to {}", written, ciff_path);
        }
        None => {
            eprintln!("No animation block found in {}", caff_path);
            process::exit(1);
        }
    }
}

fn print_usage_and_exit() -> ! {
    eprintln!("Usage: caff2ciff <caff_path> <ciff_path>");
    process::exit(1);
}
