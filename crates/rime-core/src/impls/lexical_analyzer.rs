//! LexicalAnalyzer - 綴りだけを見る簡易解析器
//!
//! 音韻辞書を使わず、単語の綴りから近似します。
//! - end rhymes: 行末の単語の「最後の母音群 + それ以降」が同じ行に同じタグ
//! - alliteration: 同じ文字で始まる連続した単語（2 文字以下の機能語は読み飛ばす）
//! - anaphora: 連続する行の先頭で繰り返される語句（空行で連続が切れる）

use std::collections::HashMap;

use crate::domain::{Alliteration, AnalysisError, AnalysisRecord, Anaphora, EndRhyme};
use crate::ports::Analyzer;

const VOWELS: &str = "aeiouyæøåäöüéèêáàâóòôíìú";

/// Words this short are skipped inside an alliteration run ("a", "og", "i").
const FUNCTION_WORD_MAX_LEN: usize = 2;

#[derive(Debug, Clone, Copy, Default)]
pub struct LexicalAnalyzer;

impl LexicalAnalyzer {
    pub fn new() -> Self {
        Self
    }
}

impl Analyzer for LexicalAnalyzer {
    fn analyze(&self, text: &str) -> Result<AnalysisRecord, AnalysisError> {
        let lines: Vec<Line<'_>> = text
            .lines()
            .enumerate()
            .map(|(idx, raw)| Line {
                number: idx + 1,
                words: words(raw),
            })
            .filter(|line| !line.words.is_empty())
            .collect();

        if lines.is_empty() {
            return Err(AnalysisError::Rejected("text contains no words".into()));
        }

        Ok(AnalysisRecord::new(text)
            .with_end_rhymes(end_rhymes(&lines))
            .with_alliteration(alliteration(&lines))
            .with_anaphora(anaphora(&lines)))
    }
}

struct Line<'a> {
    number: usize,
    words: Vec<&'a str>,
}

fn words(line: &str) -> Vec<&str> {
    line.split_whitespace()
        .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()))
        .filter(|w| !w.is_empty())
        .collect()
}

fn is_vowel(c: char) -> bool {
    VOWELS.contains(c)
}

/// Last vowel group of the word plus everything after it, lowercased.
fn rhyme_key(word: &str) -> String {
    let chars: Vec<char> = word.to_lowercase().chars().collect();
    let Some(last_vowel) = chars.iter().rposition(|c| is_vowel(*c)) else {
        return chars.into_iter().collect();
    };
    let mut start = last_vowel;
    while start > 0 && is_vowel(chars[start - 1]) {
        start -= 1;
    }
    chars[start..].iter().collect()
}

/// A, B, ..., Z, A1, B1, ...
fn rhyme_tag(index: usize) -> String {
    let letter = char::from(b'A' + (index % 26) as u8);
    match index / 26 {
        0 => letter.to_string(),
        round => format!("{letter}{round}"),
    }
}

fn end_rhymes(lines: &[Line<'_>]) -> Vec<EndRhyme> {
    let mut tags: HashMap<String, String> = HashMap::new();
    lines
        .iter()
        .filter_map(|line| {
            let last = *line.words.last()?;
            let next = tags.len();
            let tag = tags
                .entry(rhyme_key(last))
                .or_insert_with(|| rhyme_tag(next))
                .clone();
            Some(EndRhyme {
                line: line.number,
                last_word: last.to_string(),
                rhyme_tag: tag,
            })
        })
        .collect()
}

fn initial(word: &str) -> Option<char> {
    word.chars()
        .find(|c| c.is_alphabetic())
        .and_then(|c| c.to_lowercase().next())
}

fn alliteration(lines: &[Line<'_>]) -> Vec<Alliteration> {
    let mut found = Vec::new();
    for line in lines {
        let mut run: Vec<&str> = Vec::new();
        let mut symbol: Option<char> = None;

        let significant = line
            .words
            .iter()
            .copied()
            .filter(|w| w.chars().count() > FUNCTION_WORD_MAX_LEN);
        for word in significant {
            let first = initial(word);
            if first.is_some() && first == symbol {
                run.push(word);
                continue;
            }
            flush_run(line.number, symbol, &mut run, &mut found);
            symbol = first;
            run.push(word);
        }
        flush_run(line.number, symbol, &mut run, &mut found);
    }
    found
}

fn flush_run(line: usize, symbol: Option<char>, run: &mut Vec<&str>, out: &mut Vec<Alliteration>) {
    if let Some(symbol) = symbol
        && run.len() >= 2
    {
        out.push(Alliteration {
            line,
            symbol,
            words: run.iter().map(|w| w.to_string()).collect(),
        });
    }
    run.clear();
}

fn anaphora(lines: &[Line<'_>]) -> Vec<Anaphora> {
    let mut found = Vec::new();
    let mut start = 0;
    while start < lines.len() {
        let head = lines[start].words[0].to_lowercase();
        let mut end = start + 1;
        while end < lines.len()
            && lines[end].number == lines[end - 1].number + 1
            && lines[end].words[0].to_lowercase() == head
        {
            end += 1;
        }

        let run = &lines[start..end];
        if run.len() >= 2 {
            found.push(Anaphora {
                phrase: common_prefix(run),
                lines: run.iter().map(|l| l.number).collect(),
                count: run.len(),
            });
        }
        start = end;
    }
    found
}

/// Longest run of leading words shared by every line (case-insensitive),
/// spelled as in the first line.
fn common_prefix(run: &[Line<'_>]) -> String {
    let first = &run[0].words;
    let shared = (0..first.len())
        .take_while(|&i| {
            run.iter().all(|line| {
                line.words
                    .get(i)
                    .is_some_and(|w| w.to_lowercase() == first[i].to_lowercase())
            })
        })
        .count();
    first[..shared].join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const SAMPLE: &str = "
Peter Piper picked a peck
Stille skimrer snøen
Stille synker solen
Stille stiger stjernene
Glitrer gjennom grenene
";

    #[rstest]
    #[case("peck", "eck")]
    #[case("snøen", "øen")]
    #[case("solen", "en")]
    #[case("Maaneljos", "os")]
    #[case("Baanehender", "er")]
    #[case("rhythm", "ythm")]
    #[case("psst", "psst")]
    fn rhyme_key_is_last_vowel_group_onwards(#[case] word: &str, #[case] key: &str) {
        assert_eq!(rhyme_key(word), key);
    }

    #[rstest]
    #[case(0, "A")]
    #[case(25, "Z")]
    #[case(26, "A1")]
    #[case(53, "B2")]
    fn rhyme_tags(#[case] index: usize, #[case] tag: &str) {
        assert_eq!(rhyme_tag(index), tag);
    }

    #[test]
    fn end_rhymes_share_tags() {
        let record = LexicalAnalyzer.analyze(SAMPLE).unwrap();
        let tags: Vec<(usize, &str)> = record
            .end_rhymes
            .iter()
            .map(|r| (r.line, r.rhyme_tag.as_str()))
            .collect();

        // stjernene / grenene rhyme, the rest stand alone
        assert_eq!(tags, vec![(2, "A"), (3, "B"), (4, "C"), (5, "D"), (6, "D")]);
        assert_eq!(record.end_rhymes[0].last_word, "peck");
    }

    #[test]
    fn alliteration_skips_function_words() {
        let record = LexicalAnalyzer.analyze(SAMPLE).unwrap();
        let first = &record.alliteration[0];

        assert_eq!(first.line, 2);
        assert_eq!(first.symbol, 'p');
        assert_eq!(first.words, vec!["Peter", "Piper", "picked", "peck"]);
        assert_eq!(record.alliteration.len(), 5);
        assert!(record.alliteration.iter().all(|a| a.words.len() >= 2));
    }

    #[test]
    fn anaphora_groups_consecutive_openings() {
        let record = LexicalAnalyzer.analyze(SAMPLE).unwrap();
        assert_eq!(
            record.anaphora,
            vec![Anaphora {
                phrase: "Stille".into(),
                lines: vec![3, 4, 5],
                count: 3,
            }]
        );
    }

    #[test]
    fn anaphora_keeps_longest_shared_phrase() {
        let text = "I have a dream that one day\nI have a dream today\nand then";
        let record = LexicalAnalyzer.analyze(text).unwrap();
        assert_eq!(record.anaphora[0].phrase, "I have a dream");
        assert_eq!(record.anaphora[0].lines, vec![1, 2]);
    }

    #[test]
    fn stanza_break_ends_an_anaphora_run() {
        let record = LexicalAnalyzer
            .analyze("Stille skimrer snøen\n\nStille synker solen")
            .unwrap();
        assert!(record.anaphora.is_empty());

        let record = LexicalAnalyzer
            .analyze("Stille skimrer snøen\n\nStille synker solen\nStille stiger stjernene")
            .unwrap();
        assert_eq!(record.anaphora.len(), 1);
        assert_eq!(record.anaphora[0].lines, vec![3, 4]);
    }

    #[test]
    fn record_keeps_original_text() {
        let record = LexicalAnalyzer.analyze(SAMPLE).unwrap();
        assert_eq!(record.text, SAMPLE);
    }

    #[rstest]
    #[case("")]
    #[case("   \n\t\n")]
    #[case("... --- !!!")]
    fn wordless_text_is_rejected(#[case] text: &str) {
        assert!(matches!(
            LexicalAnalyzer.analyze(text),
            Err(AnalysisError::Rejected(_))
        ));
    }
}
