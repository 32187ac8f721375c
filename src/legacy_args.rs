//! Backward compatibility with the older `PORT [--direct | --routers]` invocation.
//!
//! Runs once on the raw argument vector before clap sees it. The report
//! pipeline never sees legacy syntax.

/// Rewrite legacy mode flags when the first argument is a positional port.
///
/// `meshpeers /dev/ttyUSB0 --direct --age 1h` becomes
/// `meshpeers /dev/ttyUSB0 --mode direct --age 1h`. At most one `--mode` is
/// emitted, where the first legacy flag stood; `--direct` wins over
/// `--routers`. Other arguments pass through untouched, as does any command
/// line whose first argument is a flag.
pub fn normalize_legacy_args<I>(args: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let args: Vec<String> = args.into_iter().collect();
    let legacy = args.get(1).is_some_and(|first| !first.starts_with('-'));
    if !legacy {
        return args;
    }

    let mode = if args.iter().any(|a| a == "--direct") {
        "direct"
    } else if args.iter().any(|a| a == "--routers") {
        "routers"
    } else {
        return args;
    };

    let mut out = Vec::with_capacity(args.len() + 1);
    let mut emitted = false;
    for arg in args {
        match arg.as_str() {
            "--direct" | "--routers" => {
                if !emitted {
                    out.extend(["--mode".to_string(), mode.to_string()]);
                    emitted = true;
                }
            }
            _ => out.push(arg),
        }
    }
    out
}
