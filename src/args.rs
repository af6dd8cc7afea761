use crate::error::DumpError;

pub struct ArgParser {
    iter: std::vec::IntoIter<String>,
    /// Value attached with `--flag=value`, consumed by the next `extract_value`.
    inline: Option<String>,
}

impl ArgParser {
    pub fn new(args: Vec<String>) -> Self {
        Self { iter: args.into_iter(), inline: None }
    }

    /// Next flag, normalized to its `--long` spelling.
    pub fn next_flag(&mut self) -> Result<Option<String>, DumpError> {
        if let Some(value) = self.inline.take() {
            return Err(DumpError::config(format!(
                "unexpected value {value:?}"
            )));
        }
        let Some(arg) = self.iter.next() else { return Ok(None) };
        let (flag, value) = match arg.split_once('=') {
            Some((f, v)) if f.starts_with('-') => (f.to_string(), Some(v.to_string())),
            _ => (arg, None),
        };
        self.inline = value;
        Ok(Some(normalize_flag(&flag)))
    }

    /// Extract a string value for a flag
    pub fn extract_value(&mut self, flag: &str) -> Result<String, DumpError> {
        if let Some(value) = self.inline.take() {
            return Ok(value);
        }
        self.iter.next().ok_or_else(|| {
            DumpError::config(format!("provide a value after {flag}"))
        })
    }
}

/// `-reverse` and `--reverse` are the same flag; short flags stay as is.
fn normalize_flag(flag: &str) -> String {
    if flag.starts_with("--") || flag.len() <= 2 || !flag.starts_with('-') {
        flag.to_string()
    } else {
        format!("-{flag}")
    }
}

/// Raw flag values, before validation.
#[derive(Default, Debug, Clone)]
pub struct Options {
    pub input: Option<String>,
    pub output: Option<String>,
    pub title: Option<String>,
    pub reverse: bool,
    pub range: bool,
    pub start: Option<String>,
    pub end: Option<String>,
    pub url_regex: Option<String>,
    pub title_regex: Option<String>,
    pub max: i64,
    pub format: Option<String>,
    pub status: Option<String>,
    pub verbose: bool,
}

impl Options {
    pub fn new() -> Self {
        Self { max: -1, ..Default::default() }
    }
}

#[derive(Debug)]
pub enum Command {
    Run(Options),
    Help,
    Version,
}

pub fn parse_args(args: Vec<String>) -> Result<Command, DumpError> {
    let mut parser = ArgParser::new(args);
    let mut opts = Options::new();

    while let Some(flag) = parser.next_flag()? {
        match flag.as_str() {
            "-h" | "--help" | "help" => return Ok(Command::Help),
            "-V" | "--version" => return Ok(Command::Version),
            "-i" | "--in" => opts.input = Some(parser.extract_value(&flag)?),
            "-o" | "--out" => opts.output = Some(parser.extract_value(&flag)?),
            "--title" => opts.title = Some(parser.extract_value(&flag)?),
            "-r" | "--reverse" => opts.reverse = true,
            "--range" => opts.range = true,
            "--start" => opts.start = Some(parser.extract_value(&flag)?),
            "--end" => opts.end = Some(parser.extract_value(&flag)?),
            "--url-regex" => {
                opts.url_regex = Some(parser.extract_value(&flag)?)
            }
            "--title-regex" => {
                opts.title_regex = Some(parser.extract_value(&flag)?)
            }
            "--max" => {
                let raw = parser.extract_value(&flag)?;
                opts.max = raw.trim().parse().map_err(|_| {
                    DumpError::config(format!("--max expects an integer, got {raw:?}"))
                })?;
            }
            "--format" => opts.format = Some(parser.extract_value(&flag)?),
            "--status" => opts.status = Some(parser.extract_value(&flag)?),
            "-v" | "--verbose" => opts.verbose = true,
            other => {
                return Err(DumpError::config(format!("unknown flag: {other}")));
            }
        }
    }
    Ok(Command::Run(opts))
}
