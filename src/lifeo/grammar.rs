//! Two-phase, stateful line grammar for native diary content.
//!
//! Content splits into a meta block (categories, tags, chapters, themes,
//! diary-wide options) and an entries block. Each block has its own fixed,
//! priority-ordered rule table; the first pattern matching a line wins and
//! stops further evaluation, so table order is semantically load-bearing
//! (several patterns are prefixes of others). Handlers mutate the diary
//! under construction; the "current" category, chapter, theme or entry is
//! always the most recently appended one.

use std::sync::LazyLock;

use log::debug;
use regex::{Captures, Regex};

use super::error::{FormatError, Result};
use super::models::{Chapter, ChapterCategory, Diary, Entry, Tag, TagCategory, Theme};

type Handler = fn(&Captures, &mut Diary) -> Result<()>;

struct Rule {
    pattern: Regex,
    handler: Handler,
}

fn compile(table: &[(&str, Handler)]) -> Vec<Rule> {
    table
        .iter()
        .map(|&(pattern, handler)| Rule {
            pattern: Regex::new(pattern).expect("grammar pattern is a valid regex"),
            handler,
        })
        .collect()
}

static META_RULES: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    compile(&[
        (r"^.{0,2}$", noop),
        (r"^ID(\d+)$", last_id),
        (r"^T(.)(.+)$", tag_category),
        (r"^t.(.+)$", tag),
        (r"^C(.)(.+)$", chapter_category),
        (r"^o(.)((\d+)\t)?(.+)$", open_chapter),
        (r"^c(.)((\d+)\t)?(.+)$", owned_chapter),
        (r"^d.(\d+)$", chapter_timestamp),
        (r"^M(.)(.+)$", theme),
        (r"^m(.)(.+)$", theme_config),
        (r"^O(.)(.+)$", option),
        (r"^l.(.+)$", diary_language),
        (r"^S.(\d+)$", startup_action),
        (r"^L.(\d+)$", last_element),
        // Legacy tag/theme-usage and filter lines: recognized, ignored.
        (r"^([um]).*$", noop),
        (r"^f.*$", noop),
    ])
});

static ENTRY_RULES: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    compile(&[
        (r"^.{0,1}$", noop),
        (r"^ID(\d+)$", last_id),
        (r"^([Ee])(.)(([^\d])([^\d]))?(\d+)$", entry_start),
        (r"^D([rhs])(\d+)$", entry_date),
        (r"^M.(.+)$", entry_theme),
        (r"^T.(.+)$", entry_tag),
        (r"^l.(.+)$", entry_language),
        (r"^P.(.*)$", entry_paragraph),
    ])
});

/// Parse decoded content into a diary.
///
/// Content layout: `META_BLOCK\n\nENTRIES_BLOCK`. All parse state is local
/// to this call.
pub fn parse_content(content: &str) -> Result<Diary> {
    let (meta, entries) = content.split_once("\n\n").ok_or_else(|| {
        FormatError::InvalidFormat(
            "missing blank-line separator between meta and entries blocks".to_string(),
        )
    })?;

    let mut diary = Diary::default();
    apply_block(meta, &META_RULES, "meta", &mut diary)?;
    apply_block(entries, &ENTRY_RULES, "entries", &mut diary)?;
    debug!(
        "Content parsed: {} tags, {} chapters, {} themes, {} entries",
        diary.tags.len(),
        diary.chapters.len(),
        diary.themes.len(),
        diary.entries.len()
    );
    Ok(diary)
}

fn apply_block(
    block: &str,
    rules: &[Rule],
    name: &'static str,
    diary: &mut Diary,
) -> Result<()> {
    for line in block.split('\n') {
        let matched = rules
            .iter()
            .find_map(|rule| rule.pattern.captures(line).map(|caps| (caps, rule.handler)));
        match matched {
            Some((caps, handler)) => handler(&caps, diary)?,
            None => {
                return Err(FormatError::UnrecognizedLine {
                    block: name,
                    line: line.to_string(),
                })
            }
        }
    }
    Ok(())
}

fn parse_num(digits: &str) -> Result<u64> {
    digits
        .parse()
        .map_err(|_| FormatError::InvalidFormat(format!("numeric field out of range: {:?}", digits)))
}

fn current_entry<'d>(diary: &'d mut Diary, what: &str) -> Result<&'d mut Entry> {
    diary
        .entries
        .last_mut()
        .ok_or_else(|| FormatError::InvalidFormat(format!("{} line before any entry", what)))
}

fn noop(_caps: &Captures, _diary: &mut Diary) -> Result<()> {
    Ok(())
}

fn last_id(caps: &Captures, diary: &mut Diary) -> Result<()> {
    diary.last_id = Some(parse_num(&caps[1])?);
    Ok(())
}

fn tag_category(caps: &Captures, diary: &mut Diary) -> Result<()> {
    diary.tag_categories.push(TagCategory {
        expanded: &caps[1] == "e",
        name: caps[2].to_string(),
    });
    Ok(())
}

fn tag(caps: &Captures, diary: &mut Diary) -> Result<()> {
    diary.tags.push(Tag {
        name: caps[1].to_string(),
    });
    Ok(())
}

fn chapter_category(caps: &Captures, diary: &mut Diary) -> Result<()> {
    diary.chapter_categories.push(ChapterCategory {
        name: caps[2].to_string(),
    });
    Ok(())
}

fn open_chapter(caps: &Captures, diary: &mut Diary) -> Result<()> {
    diary.chapters.push(Chapter {
        expanded: &caps[1] == "e",
        timestamp: caps.get(3).map_or(Ok(0), |ts| parse_num(ts.as_str()))?,
        name: caps[4].to_string(),
        category: None,
    });
    Ok(())
}

fn owned_chapter(caps: &Captures, diary: &mut Diary) -> Result<()> {
    // Owned chapters attach to the most recently declared category.
    let category = diary
        .chapter_categories
        .len()
        .checked_sub(1)
        .ok_or_else(|| FormatError::OrphanChapter {
            name: caps[4].to_string(),
        })?;
    diary.chapters.push(Chapter {
        expanded: &caps[1] == "e",
        timestamp: caps.get(3).map_or(Ok(0), |ts| parse_num(ts.as_str()))?,
        name: caps[4].to_string(),
        category: Some(category),
    });
    Ok(())
}

fn chapter_timestamp(caps: &Captures, diary: &mut Diary) -> Result<()> {
    let timestamp = parse_num(&caps[1])?;
    let chapter = diary.chapters.last_mut().ok_or_else(|| {
        FormatError::InvalidFormat("chapter timestamp line before any chapter".to_string())
    })?;
    chapter.timestamp = timestamp;
    Ok(())
}

fn theme(caps: &Captures, diary: &mut Diary) -> Result<()> {
    diary.themes.push(Theme {
        name: caps[2].to_string(),
        ..Theme::default()
    });
    if &caps[1] == "d" {
        diary.default_theme = Some(diary.themes.len() - 1);
    }
    Ok(())
}

fn theme_config(caps: &Captures, diary: &mut Diary) -> Result<()> {
    let theme = diary.themes.last_mut().ok_or_else(|| {
        FormatError::InvalidFormat("theme configuration line before any theme".to_string())
    })?;
    let value = Some(caps[2].to_string());
    match &caps[1] {
        "f" => theme.font = value,
        "b" => theme.color_base = value,
        "t" => theme.color_text = value,
        "h" => theme.color_heading = value,
        "s" => theme.color_subheading = value,
        "l" => theme.color_highlight = value,
        _ => {
            return Err(FormatError::UnrecognizedLine {
                block: "meta",
                line: caps[0].to_string(),
            })
        }
    }
    Ok(())
}

fn option(caps: &Captures, diary: &mut Diary) -> Result<()> {
    // Legacy sort-criteria field; only long-enough payloads mean anything.
    if caps[2].len() < 2 {
        return Ok(());
    }
    if &caps[1] == "s" {
        diary.language = Some("en".to_string());
    }
    Ok(())
}

fn diary_language(caps: &Captures, diary: &mut Diary) -> Result<()> {
    diary.language = Some(caps[1].to_string());
    Ok(())
}

fn startup_action(caps: &Captures, diary: &mut Diary) -> Result<()> {
    diary.startup_action = Some(parse_num(&caps[1])?);
    Ok(())
}

fn last_element(caps: &Captures, diary: &mut Diary) -> Result<()> {
    diary.last_element = Some(parse_num(&caps[1])?);
    Ok(())
}

fn entry_start(caps: &Captures, diary: &mut Diary) -> Result<()> {
    diary.entries.push(Entry {
        trashed: &caps[1] == "e",
        favorite: &caps[2] == "f",
        timestamp: parse_num(&caps[6])?,
        date_created: None,
        date_changed: None,
        date_status: None,
        filter_default: caps.get(4).and_then(|flag| flag.as_str().chars().next()),
        todo_status: caps.get(5).and_then(|status| status.as_str().chars().next()),
        themes: Vec::new(),
        tags: Vec::new(),
        paragraphs: Vec::new(),
        language: None,
    });
    Ok(())
}

fn entry_date(caps: &Captures, diary: &mut Diary) -> Result<()> {
    let value = Some(parse_num(&caps[2])?);
    let entry = current_entry(diary, "date")?;
    match &caps[1] {
        "r" => entry.date_created = value,
        "h" => entry.date_changed = value,
        _ => entry.date_status = value,
    }
    Ok(())
}

fn entry_theme(caps: &Captures, diary: &mut Diary) -> Result<()> {
    let name = &caps[1];
    // First match wins; duplicate names are a known upstream ambiguity.
    let index = diary
        .themes
        .iter()
        .position(|theme| theme.name == *name)
        .ok_or_else(|| FormatError::UnresolvedReference {
            kind: "theme",
            name: name.to_string(),
        })?;
    current_entry(diary, "theme reference")?.themes.push(index);
    Ok(())
}

fn entry_tag(caps: &Captures, diary: &mut Diary) -> Result<()> {
    let name = &caps[1];
    let index = diary
        .tags
        .iter()
        .position(|tag| tag.name == *name)
        .ok_or_else(|| FormatError::UnresolvedReference {
            kind: "tag",
            name: name.to_string(),
        })?;
    current_entry(diary, "tag reference")?.tags.push(index);
    Ok(())
}

fn entry_language(caps: &Captures, diary: &mut Diary) -> Result<()> {
    let language = Some(caps[1].to_string());
    current_entry(diary, "language")?.language = language;
    Ok(())
}

fn entry_paragraph(caps: &Captures, diary: &mut Diary) -> Result<()> {
    let text = caps[1].to_string();
    current_entry(diary, "paragraph")?.paragraphs.push(text);
    Ok(())
}
