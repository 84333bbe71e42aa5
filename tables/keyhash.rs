// @generated by gen_keyhash from grammar/keywords.gperf. Do not edit by hand.
// spec-digest: 0x1471c85eb71c898b
// keywords: 12, buckets: 3

pub static KEYWORDS: StaticTable = StaticTable {
    seed: 0x04e238a9864daf6d,
    min_len: 2,
    max_len: 6,
    displacements: &[
        (0, 1),
        (8, 0),
        (3, 0),
    ],
    slots: &[
        ("in", TokenKind::In),
        ("def", TokenKind::Def),
        ("return", TokenKind::Return),
        ("true", TokenKind::True),
        ("while", TokenKind::While),
        ("if", TokenKind::If),
        ("let", TokenKind::Let),
        ("else", TokenKind::Else),
        ("then", TokenKind::Then),
        ("for", TokenKind::For),
        ("extern", TokenKind::Extern),
        ("false", TokenKind::False),
    ],
};
