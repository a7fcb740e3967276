use basic_file_io::{disk, FileRuntime, OpenMode};
use std::env;

fn main() {
    env_logger::init();

    println!("BASIC File Statement Runtime v0.1.0");

    let path = env::temp_dir().join("basic-file-io-demo.txt");
    let path = path.to_string_lossy().into_owned();

    let mut files = FileRuntime::new();

    // PRINT# buffers until CLOSE flushes
    files.open(&path, 1, OpenMode::Output);
    files.print(1, "hello");
    files.newline(1);
    files.print_int(1, 42);
    files.newline(1);
    files.print_float(1, 3.25);
    files.newline(1);
    files.close(1);

    files.open(&path, 1, OpenMode::Input);
    println!("LOF(1) = {}", files.lof(1));
    while files.eof(1) == 0 {
        let line = files.input_line(1);
        if files.eof(1) != 0 && line.is_empty() {
            break;
        }
        println!("INPUT# -> {}", line);
    }
    files.close_all();

    let listed = disk::files(&path);
    println!("FILES matched {} entr(ies)", listed.len());
    disk::kill(&path);
}
