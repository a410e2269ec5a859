//! RTF stripping: reduce Rich Text Format markup to its text stream.
//!
//! The source is tokenised with a single regex into control words, hex
//! escapes, control symbols, braces, raw line breaks, and literal
//! characters. A group stack tracks two pieces of state that RTF scopes to
//! `{ … }`: whether the group is ignorable (a destination such as the font
//! table, or anything marked `\*`), and the `\uc` fallback-skip count.

use crate::config::SourceFormat;
use crate::error::TranscriptError;
use crate::pipeline::winansi;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;
use tracing::debug;

static RE_TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\\([a-z]{1,32})(-?\d{1,10})?[ ]?|\\'([0-9a-f]{2})|\\([^a-z])|([{}])|[\r\n]+|(.)",
    )
    .unwrap()
});

/// Destination control words whose groups carry no document text.
static DESTINATIONS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "aftncn", "aftnsep", "aftnsepc", "annotation", "atnauthor", "atndate", "atnicn",
        "atnid", "atnparent", "atnref", "atntime", "atrfend", "atrfstart", "author",
        "background", "bkmkend", "bkmkstart", "blipuid", "buptim", "category",
        "colorschememapping", "colortbl", "comment", "company", "creatim", "datafield",
        "datastore", "defchp", "defpap", "do", "doccomm", "docvar", "dptxbxtext", "ebcend",
        "ebcstart", "factoidname", "falt", "fchars", "ffdeftext", "ffentrymcr", "ffexitmcr",
        "ffformat", "ffhelptext", "ffl", "ffname", "ffstattext", "file", "filetbl",
        "fldinst", "fldtype", "fname", "fontemb", "fontfile", "fonttbl", "footer",
        "footerf", "footerl", "footerr", "footnote", "formfield", "ftncn", "ftnsep",
        "ftnsepc", "g", "generator", "gridtbl", "header", "headerf", "headerl", "headerr",
        "hl", "hlfr", "hlinkbase", "hlloc", "hlsrc", "hsv", "htmltag", "info", "keycode",
        "keywords", "latentstyles", "lchars", "levelnumbers", "leveltext", "lfolevel",
        "linkval", "list", "listlevel", "listname", "listoverride", "listoverridetable",
        "listpicture", "liststylename", "listtable", "listtext", "lsdlockedexcept", "macc",
        "maccPr", "mailmerge", "maln", "malnScr", "manager", "margPr", "mbar", "mbarPr",
        "mbaseJc", "mbegChr", "mborderBox", "mborderBoxPr", "mbox", "mboxPr", "mchr",
        "mcount", "mctrlPr", "md", "mdeg", "mdegHide", "mden", "mdiff", "mdPr", "me",
        "mendChr", "meqArr", "meqArrPr", "mf", "mfName", "mfPr", "mfunc", "mfuncPr",
        "mgroupChr", "mgroupChrPr", "mgrow", "mhideBot", "mhideLeft", "mhideRight",
        "mhideTop", "mhtmltag", "mlim", "mlimloc", "mlimlow", "mlimlowPr", "mlimupp",
        "mlimuppPr", "mm", "mmaddfieldname", "mmath", "mmathPict", "mmathPr", "mmaxdist",
        "mmc", "mmcJc", "mmconnectstr", "mmconnectstrdata", "mmcPr", "mmcs",
        "mmdatasource", "mmheadersource", "mmmailsubject", "mmodso", "mmodsofilter",
        "mmodsofldmpdata", "mmodsomappedname", "mmodsoname", "mmodsorecipdata",
        "mmodsosort", "mmodsosrc", "mmodsotable", "mmodsoudl", "mmodsoudldata",
        "mmodsouniquetag", "mmPr", "mmquery", "mmr", "mnary", "mnaryPr", "mnoBreak",
        "mnum", "mobjDist", "moMath", "moMathPara", "moMathParaPr", "mopEmu", "mphant",
        "mphantPr", "mplcHide", "mpos", "mr", "mrad", "mradPr", "mrPr", "msepChr", "mshow",
        "mshp", "msPre", "msPrePr", "msSub", "msSubPr", "msSubSup", "msSubSupPr", "msSup",
        "msSupPr", "mstrikeBLTR", "mstrikeH", "mstrikeTLBR", "mstrikeV", "msub",
        "msubHide", "msup", "msupHide", "mtransp", "mtype", "mvertJc", "mvfmf", "mvfml",
        "mvtof", "mvtol", "mzeroAsc", "mzeroDesc", "mzeroWid", "nesttableprops",
        "nextfile", "nonesttables", "objalias", "objclass", "objdata", "object", "objname",
        "objsect", "objtime", "oldcprops", "oldpprops", "oldsprops", "oldtprops",
        "oleclsid", "operator", "panose", "password", "passwordhash", "pgp", "pgptbl",
        "picprop", "pict", "pn", "pnseclvl", "pntext", "pntxta", "pntxtb", "printim",
        "private", "propname", "protend", "protstart", "protusertbl", "pxe", "result",
        "revtbl", "revtim", "rsidtbl", "rxe", "shp", "shpgrp", "shpinst", "shppict",
        "shprslt", "shptxt", "sn", "sp", "staticval", "stylesheet", "subject", "sv", "svb",
        "tc", "template", "themedata", "title", "txe", "ud", "upr", "userprops",
        "wgrffmtfilter", "windowcaption", "writereservation", "writereservhash", "xe",
        "xform", "xmlattrname", "xmlattrvalue", "xmlclose", "xmlname", "xmlnstbl",
        "xmlopen",
    ]
    .into_iter()
    .collect()
});

/// Text emitted by control words that stand for characters.
fn special_char(word: &str) -> Option<&'static str> {
    Some(match word {
        "par" | "line" | "row" => "\n",
        "sect" | "page" => "\n\n",
        "tab" => "\t",
        "cell" | "nestcell" => "|",
        "emdash" => "\u{2014}",
        "endash" => "\u{2013}",
        "emspace" => "\u{2003}",
        "enspace" => "\u{2002}",
        "qmspace" => "\u{2005}",
        "bullet" => "\u{2022}",
        "lquote" => "\u{2018}",
        "rquote" => "\u{2019}",
        "ldblquote" => "\u{201C}",
        "rdblquote" => "\u{201D}",
        _ => return None,
    })
}

/// Decode the argument of `\uN`. Word writes code points above 32767 as
/// negative 16-bit values.
fn unicode_escape(arg: &str) -> Option<char> {
    let code: i64 = arg.parse().ok()?;
    let code = if code < 0 { code + 0x10000 } else { code };
    Some(
        u32::try_from(code)
            .ok()
            .and_then(char::from_u32)
            .unwrap_or('\u{FFFD}'),
    )
}

/// Group-scoped state saved on `{` and restored on `}`.
#[derive(Debug, Clone, Copy)]
struct GroupState {
    ignorable: bool,
    uc_skip: usize,
}

/// Strip RTF markup from `source`, returning the plain-text content stream.
pub fn strip_rtf(source: &str) -> Result<String, TranscriptError> {
    let mut stack: Vec<GroupState> = Vec::new();
    let mut state = GroupState {
        ignorable: false,
        uc_skip: 1,
    };
    // Fallback characters still to skip after a `\u` escape.
    let mut pending_skip = 0usize;
    let mut out = String::with_capacity(source.len() / 2);

    for caps in RE_TOKEN.captures_iter(source) {
        if let Some(brace) = caps.get(5) {
            pending_skip = 0;
            if brace.as_str() == "{" {
                stack.push(state);
            } else {
                state = stack.pop().ok_or_else(|| {
                    TranscriptError::decode(
                        SourceFormat::RichText,
                        format!("unbalanced '}}' at byte {}", brace.start()),
                    )
                })?;
            }
        } else if let Some(symbol) = caps.get(4) {
            pending_skip = 0;
            match symbol.as_str() {
                "*" => state.ignorable = true,
                _ if state.ignorable => {}
                "~" => out.push('\u{00A0}'),
                "_" => out.push('\u{2011}'),
                "{" | "}" | "\\" => out.push_str(symbol.as_str()),
                // An escaped line break is an alias for `\par`.
                "\n" | "\r" => out.push('\n'),
                // `\-` optional hyphen, `\:` index subentry, `\|` formula.
                _ => {}
            }
        } else if let Some(word) = caps.get(1) {
            pending_skip = 0;
            let word = word.as_str();
            let arg = caps.get(2).map(|a| a.as_str());
            if DESTINATIONS.contains(word) {
                state.ignorable = true;
            } else if !state.ignorable {
                if let Some(text) = special_char(word) {
                    out.push_str(text);
                } else if word == "uc" {
                    state.uc_skip = arg.and_then(|a| a.parse().ok()).unwrap_or(1);
                } else if word == "u" {
                    if let Some(c) = arg.and_then(unicode_escape) {
                        out.push(c);
                        pending_skip = state.uc_skip;
                    }
                }
            }
        } else if let Some(hex) = caps.get(3) {
            if pending_skip > 0 {
                pending_skip -= 1;
            } else if !state.ignorable {
                if let Ok(b) = u8::from_str_radix(hex.as_str(), 16) {
                    out.push(winansi::decode_byte(b));
                }
            }
        } else if let Some(literal) = caps.get(6) {
            if pending_skip > 0 {
                pending_skip -= 1;
            } else if !state.ignorable {
                out.push_str(literal.as_str());
            }
        }
    }

    debug!(
        "rtf: {} source bytes → {} text chars",
        source.len(),
        out.chars().count()
    );
    Ok(out)
}
