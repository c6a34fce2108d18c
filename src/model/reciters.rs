//! Fixed list of reciters offered in the form

/// A recitation edition recognised by the content API
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Reciter {
    pub label: &'static str,
    pub arabic_label: &'static str,
    pub id: &'static str,
}

pub const DEFAULT_RECITER_ID: &str = "ar.alafasy";

pub const RECITERS: [Reciter; 4] = [
    Reciter {
        label: "Mishary Rashid Alafasy (Kuwait)",
        arabic_label: "الشيخ مشاري العفاسي (الكويت)",
        id: "ar.alafasy",
    },
    Reciter {
        label: "Mohamed Siddiq al-Minshawi (Egypt, mujawwad)",
        arabic_label: "الشيخ محمد صديق المنشاوي (مصر - مجود)",
        id: "ar.minshawi",
    },
    Reciter {
        label: "Mahmoud Khalil Al-Husary (Egypt, murattal)",
        arabic_label: "الشيخ محمود خليل الحصري (مصر - مرتل)",
        id: "ar.husary",
    },
    Reciter {
        label: "Shahriar Parhizgar (Iran)",
        arabic_label: "القارئ شهريار برهيزقار (إيران)",
        id: "ar.parhizgar",
    },
];

pub fn position_of(id: &str) -> Option<usize> {
    RECITERS.iter().position(|r| r.id == id)
}

pub fn reciter_id(label: &str) -> Option<&'static str> {
    RECITERS
        .iter()
        .find(|r| r.label == label || r.arabic_label == label)
        .map(|r| r.id)
}

pub fn known_ids() -> Vec<&'static str> {
    RECITERS.iter().map(|r| r.id).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_reciter_is_first() {
        assert_eq!(position_of(DEFAULT_RECITER_ID), Some(0));
    }

    #[test]
    fn test_lookup_by_either_label() {
        assert_eq!(reciter_id("Mahmoud Khalil Al-Husary (Egypt, murattal)"), Some("ar.husary"));
        assert_eq!(reciter_id("القارئ شهريار برهيزقار (إيران)"), Some("ar.parhizgar"));
        assert_eq!(reciter_id("unknown"), None);
    }

    #[test]
    fn test_ids_are_unique() {
        let mut ids = known_ids();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), RECITERS.len());
    }
}
