use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use clap_stdin::FileOrStdin;
use color_print::{ceprintln, cprintln};

use jackc::{driver, Error};

#[derive(Debug, clap::Parser)]
#[clap(author, version, about)]
struct Args {
    /// A .jack file, a directory of .jack files, or `-` for stdin
    input: FileOrStdin,

    #[clap(flatten)]
    options: Options,
}

#[derive(Debug, clap::Args)]
struct Options {
    /// Print VM code to stdout instead of writing .vm files
    #[clap(long)]
    stdout: bool,

    /// Dump the token stream instead of compiling
    #[clap(long)]
    tokens: bool,

    /// Also write <Name>T.xml (tokens) and <Name>.xml (parse tree)
    #[clap(long)]
    xml: bool,

    /// Enable verbose output
    #[clap(short, long)]
    verbose: bool,
}

fn dump_tokens(source: &str) -> jackc::Result<()> {
    let tokens = jackc::tokenize(source)?;
    for token in tokens.iter() {
        cprintln!(
            "<blue>{:>4}</> {:<16} {}",
            token.line,
            token.kind.to_string(),
            token.text
        );
    }
    Ok(())
}

/// Handles a unit that only reaches stdout: piped input, `--stdout` or `--tokens`.
fn print_unit(name: &str, source: &str, options: &Options) -> bool {
    if options.verbose {
        ceprintln!("<green,bold>Compiling</> {}", name);
    }

    let result = if options.tokens {
        dump_tokens(source)
    } else if options.xml {
        jackc::analyze(source).map(|analysis| {
            print!("{}", analysis.tokens);
            print!("{}", analysis.tree);
            print!("{}", analysis.code);
        })
    } else {
        jackc::compile(source).map(|code| print!("{}", code))
    };

    match result {
        Ok(()) => true,
        Err(e) => {
            e.print_diag(name, source);
            false
        }
    }
}

/// Compiles one source file into its artifacts next to it.
fn write_unit(source: &Path, options: &Options) -> bool {
    let name = source.display().to_string();
    if options.verbose {
        ceprintln!("<green,bold>Compiling</> {}", name);
    }

    let result = if options.xml {
        driver::analyze_file(source)
    } else {
        driver::compile_file(source).map(|out| vec![out])
    };

    match result {
        Ok(written) => {
            if options.verbose {
                for path in written {
                    ceprintln!("<green,bold>Wrote</> {}", path.display());
                }
            }
            true
        }
        Err(e) => {
            // the file is read again only to quote the offending line
            let text = e
                .line()
                .and_then(|_| driver::read_source(source).ok())
                .unwrap_or_default();
            e.print_diag(&name, &text);
            false
        }
    }
}

fn run_path(path: &Path, options: &Options) -> bool {
    let sources = match driver::discover_sources(path) {
        Ok(sources) => sources,
        Err(e) => {
            e.print_diag(&path.display().to_string(), "");
            return false;
        }
    };

    // a failing unit does not stop the others
    let mut ok = true;
    for source in sources {
        if !options.stdout && !options.tokens {
            ok &= write_unit(&source, options);
            continue;
        }
        match driver::read_source(&source) {
            Ok(text) => ok &= print_unit(&source.display().to_string(), &text, options),
            Err(e) => {
                e.print_diag(&source.display().to_string(), "");
                ok = false;
            }
        }
    }
    ok
}

fn main() -> ExitCode {
    let Args { input, options } = Args::parse();

    let ok = if input.is_stdin() {
        match input.contents() {
            Ok(source) => print_unit("<stdin>", &source, &options),
            Err(e) => {
                Error::Stdin(e).print_diag("<stdin>", "");
                false
            }
        }
    } else {
        let path = PathBuf::from(input.filename());
        run_path(&path, &options)
    };

    if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
