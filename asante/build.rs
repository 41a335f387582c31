use std::io::Write;

const DATADESC: &str = "datadesc/datadesc-69.xml";

fn main() {
    println!("cargo:rerun-if-changed={}", DATADESC);

    let data = std::fs::read(DATADESC).unwrap();
    let dictionary = asante_codegen::load_definitions(&data, asante_codegen::Options { strict: true })
        .unwrap_or_else(|e| panic!("failed to compile {}: {}", DATADESC, e));
    let code = asante_codegen::generate_code(&dictionary);

    let out_dir = std::env::var_os("OUT_DIR").unwrap();
    let out_path = std::path::Path::new(&out_dir).join("asante_generated.rs");

    let mut output = std::fs::File::create(&out_path).unwrap();
    write!(output, "{}", code).unwrap();
    output.flush().unwrap();
}
