//! Static keyword tables for tag scoring.
//!
//! # Responsibility
//! - Map content keywords to candidate tag names.
//! - Define preset seed tags and weighted pattern detectors.
//!
//! # Invariants
//! - All keywords are stored lowercase; match sites lowercase the input once.
//! - Detector weights are a behavioral compatibility contract and must not
//!   be retuned without a migration plan for existing users.

/// Fixed, user-language seed tags available before any usage history exists.
pub const PRESET_TAG_NAMES: &[&str] = &[
    "仕事",
    "買い物",
    "アイデア",
    "家事",
    "勉強",
    "健康",
    "料理",
    "お金",
    "旅行",
    "メモ",
];

/// Generic low-weight fallback candidate for longer uncategorized text.
pub const GENERIC_FALLBACK_TAG: &str = "メモ";

/// Score contribution for a static keyword or preset-name hit.
pub const KEYWORD_HIT_WEIGHT: u32 = 10;

/// Content keyword to tag-name mapping.
///
/// A hit contributes [`KEYWORD_HIT_WEIGHT`] to the mapped tag and marks it
/// a candidate. Keywords are matched case-insensitively as substrings.
pub const KEYWORD_TAG_TABLE: &[(&str, &str)] = &[
    // 仕事
    ("会議", "仕事"),
    ("打ち合わせ", "仕事"),
    ("資料", "仕事"),
    ("メール", "仕事"),
    ("残業", "仕事"),
    ("出張", "仕事"),
    ("meeting", "仕事"),
    // 買い物
    ("スーパー", "買い物"),
    ("コンビニ", "買い物"),
    ("牛乳", "買い物"),
    ("洗剤", "買い物"),
    ("日用品", "買い物"),
    // 料理
    ("レシピ", "料理"),
    ("夕飯", "料理"),
    ("弁当", "料理"),
    ("作り置き", "料理"),
    ("recipe", "料理"),
    // 家事
    ("掃除", "家事"),
    ("洗濯", "家事"),
    ("ゴミ", "家事"),
    ("片付け", "家事"),
    // 勉強
    ("試験", "勉強"),
    ("宿題", "勉強"),
    ("英語", "勉強"),
    ("読書", "勉強"),
    ("講座", "勉強"),
    // 健康
    ("病院", "健康"),
    ("運動", "健康"),
    ("ジム", "健康"),
    ("薬", "健康"),
    ("睡眠", "健康"),
    // お金
    ("家賃", "お金"),
    ("請求", "お金"),
    ("振込", "お金"),
    ("給料", "お金"),
    ("貯金", "お金"),
    // 旅行
    ("ホテル", "旅行"),
    ("飛行機", "旅行"),
    ("新幹線", "旅行"),
    ("観光", "旅行"),
    ("旅程", "旅行"),
];

/// A fixed keyword set that, when any member matches, contributes one
/// weighted hit to a single tag candidate.
///
/// Each detector fires at most once per evaluation regardless of how many
/// of its keywords match.
#[derive(Debug, Clone, Copy)]
pub struct PatternDetector {
    /// Candidate tag name the detector votes for.
    pub tag_name: &'static str,
    /// Score contribution when the detector fires.
    pub weight: u32,
    /// Lowercase trigger keywords, matched as substrings.
    pub keywords: &'static [&'static str],
}

/// Weighted cue detectors for common memo shapes.
pub const PATTERN_DETECTORS: &[PatternDetector] = &[
    PatternDetector {
        tag_name: "疑問",
        weight: 8,
        keywords: &[
            "?", "？", "かな", "だろうか", "どうして", "なぜ", "どうやって", "how", "why",
        ],
    },
    PatternDetector {
        tag_name: "料理",
        weight: 8,
        keywords: &[
            "食べ",
            "飲み",
            "ご飯",
            "ごはん",
            "朝食",
            "昼食",
            "夕食",
            "カフェ",
            "レストラン",
            "美味しい",
            "おいしい",
        ],
    },
    PatternDetector {
        tag_name: "タスク",
        weight: 8,
        keywords: &[
            "やること",
            "やらなきゃ",
            "しなきゃ",
            "しないと",
            "忘れずに",
            "提出",
            "締切",
            "締め切り",
            "期限",
            "todo",
        ],
    },
    PatternDetector {
        tag_name: "買い物",
        weight: 8,
        keywords: &["買う", "買い", "購入", "注文", "セール", "割引"],
    },
    PatternDetector {
        tag_name: "アイデア",
        weight: 7,
        keywords: &[
            "アイデア",
            "ひらめき",
            "思いつき",
            "かもしれない",
            "考えてみ",
            "idea",
        ],
    },
];
