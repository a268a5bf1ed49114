// Morphological analysis and stemming output

use hashbrown::HashSet;
use hunspell_core::morph::{FIELD_FLAG, FIELD_PART, FIELD_STEM, MorphFields};
use hunspell_dict::AffixTable;

use super::reduce::Reduction;
use crate::speller::compound::CompoundPart;
use crate::speller::dictionary::DictionarySpeller;

/// Render one reduction: `st:<stem>`, the entry's own fields, then each
/// affix step's fields, innermost first. A step without fields is shown
/// as `fl:<flag>`.
pub fn describe(table: &AffixTable, reduction: &Reduction<'_>) -> String {
    let entry = reduction.entry;
    let mut fields = MorphFields::new();
    fields.push(FIELD_STEM, entry.stem());
    for field in entry.morph.iter().filter(|f| f.tag != FIELD_STEM) {
        fields.push(field.tag.as_str(), field.value.as_str());
    }
    for &step in &reduction.chain {
        let rule = table.rule(step);
        if rule.morph.is_empty() {
            fields.push(FIELD_FLAG, table.format_flag(rule.flag));
        } else {
            fields.extend_from(&rule.morph);
        }
    }
    fields.to_string()
}

/// Render a compound as `pa:<part> st:<stem>` per part.
pub fn describe_compound(parts: &[CompoundPart<'_>]) -> String {
    let mut fields = MorphFields::new();
    for part in parts {
        fields.push(FIELD_PART, part.text.as_str());
        fields.push(FIELD_STEM, part.entry.stem());
    }
    fields.to_string()
}

fn dedup(items: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.clone()))
        .collect()
}

/// All analyses of `word`, one line per reduction, or a single compound
/// line when the word is only valid as a compound.
pub fn analyze(speller: &DictionarySpeller<'_>, word: &str) -> Vec<String> {
    let Some(found) = speller.accepted(word) else {
        return Vec::new();
    };
    if !found.is_empty() {
        let table = speller.table();
        return dedup(found.iter().map(|r| describe(table, r)));
    }
    speller
        .compound(word)
        .map(|parts| vec![describe_compound(&parts)])
        .unwrap_or_default()
}

/// Stems of `word` in reduction order, without duplicates. A compound
/// keeps its leading parts and stems the last one.
pub fn stem(speller: &DictionarySpeller<'_>, word: &str) -> Vec<String> {
    let Some(found) = speller.accepted(word) else {
        return Vec::new();
    };
    if !found.is_empty() {
        return dedup(found.iter().map(|r| r.entry.stem().to_string()));
    }
    let Some(parts) = speller.compound(word) else {
        return Vec::new();
    };
    let Some((last, leading)) = parts.split_last() else {
        return Vec::new();
    };
    let mut stem: String = leading.iter().map(|p| p.text.as_str()).collect();
    stem.push_str(last.entry.stem());
    vec![stem]
}

#[cfg(test)]
mod tests {
    use super::*;
    use hunspell_dict::DictionaryStore;

    const AFF: &str = "\
COMPOUNDFLAG C
SFX G Y 2
SFX G 0 ning n is:gerund
SFX G 0 ing [^n] is:gerund
SFX S Y 1
SFX S 0 s .
";

    const DIC: &str = "\
5
run/GS po:verb
went po:verb st:go
hello
foot/C
ball/CS
";

    fn fixture() -> (AffixTable, DictionaryStore) {
        let table = AffixTable::parse(AFF).unwrap();
        let store = DictionaryStore::parse(DIC, &table).unwrap();
        (table, store)
    }

    #[test]
    fn analysis_lists_entry_and_affix_fields() {
        let (table, store) = fixture();
        let speller = DictionarySpeller::new(&table, &store);
        assert_eq!(analyze(&speller, "running"), vec!["st:run po:verb is:gerund"]);
        assert_eq!(analyze(&speller, "runs"), vec!["st:run po:verb fl:S"]);
        assert_eq!(analyze(&speller, "hello"), vec!["st:hello"]);
        assert!(analyze(&speller, "helo").is_empty());
    }

    #[test]
    fn stem_annotation_wins() {
        let (table, store) = fixture();
        let speller = DictionarySpeller::new(&table, &store);
        assert_eq!(analyze(&speller, "went"), vec!["st:go po:verb"]);
        assert_eq!(stem(&speller, "went"), vec!["go"]);
    }

    #[test]
    fn stems() {
        let (table, store) = fixture();
        let speller = DictionarySpeller::new(&table, &store);
        assert_eq!(stem(&speller, "running"), vec!["run"]);
        assert_eq!(stem(&speller, "Runs"), vec!["run"]);
        assert!(stem(&speller, "runing").is_empty());
    }

    #[test]
    fn compound_analysis() {
        let (table, store) = fixture();
        let speller = DictionarySpeller::new(&table, &store);
        assert_eq!(
            analyze(&speller, "footballs"),
            vec!["pa:foot st:foot pa:balls st:ball"]
        );
        assert_eq!(stem(&speller, "footballs"), vec!["football"]);
    }
}
