// src/curriculum/glyphs.rs

use super::{Difficulty, Track, WorksheetStep};

/// How a glyph is formed. Drives difficulty and skill tags.
#[derive(Debug, Clone, Copy)]
enum Stroke {
    Straight,
    Curve,
    Hump,
    Diagonal,
    Hook,
}

impl Stroke {
    fn difficulty(self) -> Difficulty {
        match self {
            Stroke::Straight => Difficulty::Easy,
            Stroke::Curve | Stroke::Hump => Difficulty::Medium,
            Stroke::Diagonal | Stroke::Hook => Difficulty::Hard,
        }
    }

    fn skill(self) -> &'static str {
        match self {
            Stroke::Straight => "straight-lines",
            Stroke::Curve => "curves",
            Stroke::Hump => "humps",
            Stroke::Diagonal => "diagonals",
            Stroke::Hook => "hooks",
        }
    }

    fn phrase(self) -> &'static str {
        match self {
            Stroke::Straight => "clean straight strokes",
            Stroke::Curve => "a smooth round curve",
            Stroke::Hump => "a pull-down stroke and a bouncy hump",
            Stroke::Diagonal => "slanted lines that meet cleanly",
            Stroke::Hook => "a controlled hook at the end",
        }
    }
}

struct Glyph {
    symbol: char,
    word: &'static str,
    emoji: &'static str,
    stroke: Stroke,
}

const fn g(symbol: char, word: &'static str, emoji: &'static str, stroke: Stroke) -> Glyph {
    Glyph { symbol, word, emoji, stroke }
}

const LETTERS: [Glyph; 26] = [
    g('a', "apple", "🍎", Stroke::Curve),
    g('b', "bear", "🐻", Stroke::Hump),
    g('c', "cat", "🐱", Stroke::Curve),
    g('d', "dog", "🐶", Stroke::Curve),
    g('e', "elephant", "🐘", Stroke::Curve),
    g('f', "frog", "🐸", Stroke::Hook),
    g('g', "giraffe", "🦒", Stroke::Hook),
    g('h', "house", "🏠", Stroke::Hump),
    g('i', "ice cream", "🍦", Stroke::Straight),
    g('j', "juice", "🧃", Stroke::Hook),
    g('k', "kite", "🪁", Stroke::Diagonal),
    g('l', "lion", "🦁", Stroke::Straight),
    g('m', "monkey", "🐵", Stroke::Hump),
    g('n', "nest", "🪺", Stroke::Hump),
    g('o', "octopus", "🐙", Stroke::Curve),
    g('p', "penguin", "🐧", Stroke::Hump),
    g('q', "queen", "👑", Stroke::Hook),
    g('r', "rainbow", "🌈", Stroke::Hump),
    g('s', "sun", "🌞", Stroke::Curve),
    g('t', "turtle", "🐢", Stroke::Straight),
    g('u', "umbrella", "🌂", Stroke::Hook),
    g('v', "violin", "🎻", Stroke::Diagonal),
    g('w', "whale", "🐳", Stroke::Diagonal),
    g('x', "xylophone", "🎼", Stroke::Diagonal),
    g('y', "yo-yo", "🪀", Stroke::Diagonal),
    g('z', "zebra", "🦓", Stroke::Diagonal),
];

/// Letters formed from the "magic c" starting shape, in teaching order.
const MAGIC_C: [char; 6] = ['c', 'a', 'd', 'g', 'o', 'q'];

const DIGITS: [Glyph; 10] = [
    g('0', "zero", "🍩", Stroke::Curve),
    g('1', "one", "🕯️", Stroke::Straight),
    g('2', "two", "🦢", Stroke::Curve),
    g('3', "three", "🐝", Stroke::Curve),
    g('4', "four", "⛵", Stroke::Straight),
    g('5', "five", "🖐️", Stroke::Hook),
    g('6', "six", "🐌", Stroke::Curve),
    g('7', "seven", "🌟", Stroke::Diagonal),
    g('8', "eight", "⛄", Stroke::Curve),
    g('9', "nine", "🎈", Stroke::Hook),
];

const COLORS: [&str; 6] = ["rose", "amber", "emerald", "sky", "violet", "orange"];

fn minutes(difficulty: Difficulty) -> u32 {
    match difficulty {
        Difficulty::Easy => 5,
        Difficulty::Medium => 8,
        Difficulty::Hard => 10,
    }
}

fn letter(symbol: char) -> &'static Glyph {
    let index = (symbol as u8 - b'a') as usize;
    &LETTERS[index]
}

fn step(track: Track, index: usize, glyph: &Glyph, shown: char, id: String) -> WorksheetStep {
    let difficulty = glyph.stroke.difficulty();
    let mut skills = vec![glyph.stroke.skill().to_string()];

    let (title, kid_title, description) = match track {
        Track::Lowercase => (
            format!("Lowercase {shown}"),
            format!("{shown} is for {}", glyph.word),
            format!("Form the lowercase letter {shown} with {}.", glyph.stroke.phrase()),
        ),
        Track::MagicC => {
            skills.push("magic-c".to_string());
            (
                format!("Magic C: {shown}"),
                format!("Magic c makes {shown}!"),
                format!(
                    "Start with the magic c shape, then finish the letter {shown} with {}.",
                    glyph.stroke.phrase()
                ),
            )
        }
        Track::Numbers => {
            skills.push("numerals".to_string());
            (
                format!("Number {shown}"),
                format!("Let's write {}!", glyph.word),
                format!("Form the numeral {shown} with {}.", glyph.stroke.phrase()),
            )
        }
        Track::Uppercase => {
            skills.push("capitals".to_string());
            (
                format!("Uppercase {shown}"),
                format!("Big {shown} for {}", glyph.word),
                format!(
                    "Form the capital letter {shown} tall and steady, with {}.",
                    glyph.stroke.phrase()
                ),
            )
        }
    };

    WorksheetStep {
        worksheet_url: format!("/worksheets/{}/{}.pdf", track.slug(), id),
        kid_description: format!("Trace the {shown} in {} {}, then write your own!", glyph.word, glyph.emoji),
        id,
        title,
        kid_title,
        description,
        difficulty,
        skills,
        estimated_minutes: minutes(difficulty),
        color: COLORS[index % COLORS.len()].to_string(),
        emoji: glyph.emoji.to_string(),
    }
}

pub(super) fn build(track: Track) -> Vec<WorksheetStep> {
    match track {
        Track::Lowercase => LETTERS
            .iter()
            .enumerate()
            .map(|(i, gl)| step(track, i, gl, gl.symbol, format!("letter-{}", gl.symbol)))
            .collect(),
        Track::MagicC => MAGIC_C
            .iter()
            .enumerate()
            .map(|(i, &c)| step(track, i, letter(c), c, format!("magic-c-{c}")))
            .collect(),
        Track::Numbers => DIGITS
            .iter()
            .enumerate()
            .map(|(i, gl)| step(track, i, gl, gl.symbol, format!("number-{}", gl.symbol)))
            .collect(),
        Track::Uppercase => LETTERS
            .iter()
            .enumerate()
            .map(|(i, gl)| {
                step(
                    track,
                    i,
                    gl,
                    gl.symbol.to_ascii_uppercase(),
                    format!("uppercase-{}", gl.symbol),
                )
            })
            .collect(),
    }
}
