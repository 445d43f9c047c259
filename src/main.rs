use clap::Parser;
use fvm::cli::{generate_completions, Args, Commands};
use fvm::config::AppConfig;
use fvm::diagnostic::render_diagnostics;
use fvm::vm::{Vm, VmError};
use owo_colors::OwoColorize;
use std::io::{self, BufRead, Write};
use std::path::Path;

fn main() {
    let args = Args::parse();

    if let Some(Commands::Complete { shell }) = args.command {
        generate_completions(shell);
        return;
    }

    let config = AppConfig::from_args(&args);

    if let Some(line) = &args.line {
        run_line(line, &config);
    } else if let Some(path) = &args.file {
        run_file(path, &config);
    } else {
        run_repl(&config);
    }
}

fn run_line(line: &str, config: &AppConfig) {
    let mut vm = Vm::new();
    verbose_log(config, &format!("vocabulary: {} builtin words", vm.words().len()));

    match vm.execute(line) {
        Ok(()) => {
            if !vm.output().is_empty() {
                println!("{}", vm.output());
            }
            if config.show_stack {
                println!("{}", vm.stack());
            }
        }
        Err(err) => {
            report_error(line, "line", &err, config);
            std::process::exit(1);
        }
    }
}

fn run_file(path: &Path, config: &AppConfig) {
    let source = match read_file(path) {
        Ok(source) => source,
        Err(message) => {
            error_message(config, &message);
            std::process::exit(1);
        }
    };

    let mut vm = Vm::new();
    for (line_no, line) in source.lines().enumerate() {
        if let Err(err) = vm.execute(line) {
            let source_name = format!("{}:{}", path.display(), line_no + 1);
            report_error(line, &source_name, &err, config);
            std::process::exit(1);
        }
        if !vm.output().is_empty() {
            println!("{}", vm.output());
        }
    }

    if config.show_stack {
        println!("{}", vm.stack());
    }
    verbose_log(
        config,
        &format!("executed {} lines from {}", source.lines().count(), path.display()),
    );
}

fn run_repl(config: &AppConfig) {
    let mut vm = Vm::new();
    if config.interactive {
        println!("fvm {}", env!("CARGO_PKG_VERSION"));
        verbose_log(
            config,
            &format!(
                "vocabulary: {}",
                vm.words().names().collect::<Vec<_>>().join(" ")
            ),
        );
    }

    let stdin = io::stdin();
    loop {
        if config.interactive {
            print!("> ");
            io::stdout().flush().ok();
        }

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(err) => {
                error_message(config, &format!("Failed to read input: {}", err));
                std::process::exit(1);
            }
        }

        match vm.execute(&line) {
            Ok(()) => {
                if !vm.output().is_empty() {
                    println!("{}", vm.output());
                }
                if config.show_stack {
                    println!("{}", vm.stack());
                }
                print_status(&vm, config);
            }
            Err(err) => {
                report_error(line.trim_end(), "repl", &err, config);
                print_status(&vm, config);
            }
        }
    }
}

fn print_status(vm: &Vm, config: &AppConfig) {
    let status = vm.status();
    if config.color_enabled {
        match status {
            fvm::Status::Ok => println!("{}", status.green()),
            fvm::Status::Error => println!("{}", status.red()),
        }
    } else {
        println!("{}", status);
    }
}

fn report_error(source: &str, source_name: &str, err: &VmError, config: &AppConfig) {
    let diagnostic = err.to_diagnostic();
    eprint!(
        "{}",
        render_diagnostics(source, source_name, &[diagnostic], config.color_enabled)
    );
}

fn read_file(path: &Path) -> Result<String, String> {
    std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {}", path.display(), e))
}

fn verbose_log(config: &AppConfig, message: &str) {
    if config.verbose {
        eprintln!("[fvm:debug] {}", message);
    }
}

fn error_message(config: &AppConfig, message: &str) {
    if config.color_enabled {
        eprintln!("{}", message.red().bold());
    } else {
        eprintln!("{}", message);
    }
}
