use super::{HelpBook, HelpFlag};

pub(crate) fn book() -> HelpBook<'static> {
    HelpBook {
        title: "Pocket Dump",
        usage: "pocket_dump [options]",
        details: &[
            "Reads a bookmark export (the JSON \"retrieve\" response with a `list` object) and writes an HTML or plain-text listing of the saved links, oldest first.",
            "Titles fall back from the given title to the resolved title to the URL. Bookmarks saved in the same second are all listed.",
            "Any malformed record, bad timestamp, or bad flag aborts the run before an output file is written.",
        ],
        flags: FLAGS,
        environment: ENVIRONMENT,
        examples: &[
            "pocket_dump -i ril_export.json -o bookmarks.html",
            "pocket_dump -i ril_export.json --range",
            "pocket_dump -i ril_export.json --start 2017-11-01 --end 2017-11-30T18 --reverse --max 20",
            "pocket_dump -i ril_export.json --url-regex github\\.com --format text",
        ],
        footer: &["`pdump` is a shorter alias for the same program."],
    }
}

const FLAGS: &[HelpFlag<'static>] = &[
    HelpFlag {
        name: "-i, --in <path>",
        desc: "Input JSON dump. Default: stdin (also `-`).",
    },
    HelpFlag {
        name: "-o, --out <path>",
        desc: "Output file. Default: stdout (also `-`).",
    },
    HelpFlag {
        name: "--title <text>",
        desc: "HTML <title> of the output document. Default: \"Pocket Dump\".",
    },
    HelpFlag {
        name: "--format <html|text>",
        desc: "Output format. Default: html.",
    },
    HelpFlag {
        name: "-r, --reverse",
        desc: "Most recent first.",
    },
    HelpFlag {
        name: "--range",
        desc: "Only print the earliest and latest save time found in the dump.",
    },
    HelpFlag {
        name: "--start <time>",
        desc: "List bookmarks saved at or after this time: 2017-11-01[T15[:04[:05]]][Z|-07:00]. Local time unless an offset is given. Default: beginning of the dump.",
    },
    HelpFlag {
        name: "--end <time>",
        desc: "List bookmarks saved at or before this time, same grammar as --start. Default: now.",
    },
    HelpFlag {
        name: "--url-regex <re>",
        desc: "Only bookmarks whose URL matches the regular expression.",
    },
    HelpFlag {
        name: "--title-regex <re>",
        desc: "Only bookmarks whose displayed title matches the regular expression.",
    },
    HelpFlag {
        name: "--max <n>",
        desc: "Maximum number of bookmarks listed, -1 for unlimited. Default: -1.",
    },
    HelpFlag {
        name: "--status <active|unread|all>",
        desc: "active skips deleted items, unread keeps only the unread list, all keeps everything. Default: active.",
    },
    HelpFlag {
        name: "-v, --verbose",
        desc: "Log pipeline progress to stderr.",
    },
    HelpFlag { name: "-h, --help", desc: "Show this message." },
    HelpFlag { name: "-V, --version", desc: "Print the version." },
];

const ENVIRONMENT: &[HelpFlag<'static>] = &[
    HelpFlag {
        name: "POCKET_DUMP_LOG",
        desc: "tracing filter for stderr logs, e.g. `debug` (default: warn).",
    },
    HelpFlag {
        name: "NO_COLOR",
        desc: "Disable colors in text output.",
    },
    HelpFlag {
        name: "TZ",
        desc: "Time zone used for dates without an offset and for printed times.",
    },
];
