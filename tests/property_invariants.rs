use chrono::NaiveDate;
use proptest::prelude::*;

use moodgarden::{
    core::store::DayStore,
    day::{DayKey, FixedClock},
    persist::MemoryKv,
    types::{MoodId, PlantedToken},
};

#[derive(Debug, Clone)]
enum Action {
    Plant { day: i8, x: u16, y: u16, mood: u8 },
    LetGo { day: i8 },
    Write { day: i8, text: String },
}

fn action_strategy() -> impl Strategy<Value = Action> {
    prop_oneof![
        (-3i8..4, 0u16..2000, 0u16..2000, 0u8..4)
            .prop_map(|(day, x, y, mood)| Action::Plant { day, x, y, mood }),
        (-3i8..4).prop_map(|day| Action::LetGo { day }),
        (-3i8..4, ".{0,24}").prop_map(|(day, text)| Action::Write { day, text }),
    ]
}

fn mood(idx: u8) -> MoodId {
    MoodId::ALL[usize::from(idx) % MoodId::ALL.len()]
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
}

proptest! {
    #[test]
    fn random_sessions_match_a_stack_model(actions in prop::collection::vec(action_strategy(), 1..150)) {
        let mut store = DayStore::new(MemoryKv::new(), FixedClock(today()));
        let mut plants: std::collections::BTreeMap<i8, Vec<PlantedToken>> = Default::default();
        let mut journals: std::collections::BTreeMap<i8, String> = Default::default();

        for action in actions {
            match action {
                Action::Plant { day, x, y, mood: m } => {
                    let key = store.key_for(i64::from(day)).unwrap();
                    let token = PlantedToken::new(f64::from(x), f64::from(y), mood(m));
                    store.append_plant(&key, token).unwrap();
                    plants.entry(day).or_default().push(token);
                }
                Action::LetGo { day } => {
                    let key = store.key_for(i64::from(day)).unwrap();
                    let expected = plants.entry(day).or_default().pop();
                    prop_assert_eq!(store.remove_last_plant(&key).unwrap(), expected);
                }
                Action::Write { day, text } => {
                    let key = store.key_for(i64::from(day)).unwrap();
                    store.save_journal(&key, &text).unwrap();
                    journals.insert(day, text);
                }
            }
        }

        for day in -3i8..4 {
            let key = store.key_for(i64::from(day)).unwrap();
            let expected_plants = plants.get(&day).cloned().unwrap_or_default();
            let expected_journal = journals.get(&day).cloned().unwrap_or_default();
            prop_assert_eq!(store.load_plants(&key).unwrap(), expected_plants);
            prop_assert_eq!(store.load_journal(&key).unwrap(), expected_journal);
        }
    }

    #[test]
    fn day_keys_are_strictly_ordered_by_offset(a in -200_000i64..200_000, b in -200_000i64..200_000) {
        let ka = DayKey::from_offset(today(), a).unwrap();
        let kb = DayKey::from_offset(today(), b).unwrap();
        prop_assert_eq!(ka.cmp(&kb), a.cmp(&b));
        prop_assert_eq!(ka, DayKey::from_offset(today(), a).unwrap());
    }

    #[test]
    fn day_key_strings_sort_like_offsets_within_four_digit_years(a in -700_000i64..2_000_000, b in -700_000i64..2_000_000) {
        let ka = DayKey::from_offset(today(), a).unwrap().to_string();
        let kb = DayKey::from_offset(today(), b).unwrap().to_string();
        prop_assert_eq!(ka.cmp(&kb), a.cmp(&b));
    }
}
