//! Ordered cost tables
//!
//! Each version's catalogue is the previous version's table with one ordered
//! list of insertions and overrides applied on top. Keeping the lists as plain
//! ordered slices keeps the layering auditable.

/// Base table shared by V1 and V2.
pub(crate) const BASE: &[(&str, u64)] = &[
    // equality, type checks, failure
    ("0", 1),
    ("1", 1),
    ("2", 1),
    // integer arithmetic and comparisons
    ("100", 1),
    ("101", 1),
    ("102", 1),
    ("103", 1),
    ("104", 1),
    ("105", 1),
    ("106", 1),
    ("107", 1),
    // byte vectors
    ("200", 1),
    ("201", 1),
    ("202", 1),
    ("203", 10),
    // strings
    ("300", 10),
    ("303", 1),
    ("304", 1),
    ("305", 1),
    // lists
    ("400", 2),
    ("401", 2),
    ("1100", 2),
    // conversions
    ("410", 1),
    ("411", 1),
    ("412", 1),
    ("420", 1),
    ("421", 1),
    // crypto
    ("500", 100),
    ("501", 10),
    ("502", 10),
    ("503", 10),
    // base encodings
    ("600", 10),
    ("601", 10),
    ("602", 10),
    ("603", 10),
    // chain state
    ("1000", 100),
    ("1001", 100),
    ("1003", 100),
    ("1040", 10),
    ("1041", 10),
    ("1042", 10),
    ("1043", 10),
    ("1050", 10),
    ("1051", 10),
    ("1052", 10),
    ("1053", 10),
    ("1060", 100),
    // user functions
    ("throw", 2),
    ("!", 11),
    ("!=", 26),
    ("-", 9),
    ("isDefined", 35),
    ("extract", 13),
    ("addressFromString", 124),
    ("addressFromPublicKey", 82),
    ("wavesBalance", 109),
    ("getInteger", 10),
    ("getBoolean", 10),
    ("getBinary", 10),
    ("getString", 10),
    ("takeRight", 19),
    ("dropRight", 19),
    ("takeRightBytes", 19),
    ("dropRightBytes", 19),
    // constructors
    ("Address", 1),
    ("Alias", 1),
    ("DataEntry", 2),
];

/// Applied on top of the V2 table to produce V3.
pub(crate) const V3_OVERRIDES: &[(&str, u64)] = &[
    // new natives
    ("108", 100),
    ("109", 100),
    ("504", 300),
    ("604", 10),
    ("605", 10),
    ("700", 30),
    ("1004", 100),
    ("1005", 100),
    ("1006", 100),
    ("1061", 10),
    ("1200", 20),
    ("1201", 10),
    ("1202", 10),
    ("1203", 20),
    ("1204", 20),
    ("1205", 100),
    ("1206", 20),
    ("1207", 20),
    ("1208", 20),
    // reduced user-function costs
    ("throw", 1),
    ("isDefined", 1),
    ("!=", 1),
    ("!", 1),
    ("-", 1),
    // zero-cost type constructors
    ("Ceiling", 0),
    ("Down", 0),
    ("Floor", 0),
    ("HalfDown", 0),
    ("HalfEven", 0),
    ("HalfUp", 0),
    ("Up", 0),
    ("NoAlg", 0),
    ("Md5", 0),
    ("Sha1", 0),
    ("Sha224", 0),
    ("Sha256", 0),
    ("Sha384", 0),
    ("Sha512", 0),
    ("Sha3224", 0),
    ("Sha3256", 0),
    ("Sha3384", 0),
    ("Sha3512", 0),
    ("Unit", 0),
    // extractors and value-or-default helpers
    ("value", 13),
    ("valueOrErrorMessage", 13),
    ("parseIntValue", 20),
    ("addressFromStringValue", 124),
    ("getIntegerValue", 10),
    ("getBooleanValue", 10),
    ("getBinaryValue", 10),
    ("getStringValue", 10),
    // contract result constructors
    ("WriteSet", 1),
    ("TransferSet", 1),
    ("ScriptTransfer", 2),
    ("ScriptResult", 1),
];

/// Applied on top of the V3 table to produce V4.
pub(crate) const V4_OVERRIDES: &[(&str, u64)] = &[
    // entry-type constructors and actions
    ("IntegerEntry", 2),
    ("StringEntry", 2),
    ("BinaryEntry", 2),
    ("BooleanEntry", 2),
    ("DeleteEntry", 2),
    ("Issue", 7),
    ("Reissue", 3),
    ("Burn", 3),
    ("SponsorFee", 2),
    // string and value helpers
    ("contains", 20),
    ("valueOrElse", 13),
    // list natives
    ("405", 20),
    ("406", 3),
    ("407", 3),
    ("408", 3),
    ("409", 3),
    ("1100", 1),
    ("1101", 3),
    ("1102", 10),
    ("1103", 5),
    ("1104", 5),
    ("1105", 5),
    ("1209", 20),
    ("1210", 20),
    // merkle
    ("701", 30),
    ("702", 30),
    // zero-knowledge proof verification
    ("800", 3900),
    ("801", 1650),
    // signature recovery
    ("900", 70),
    // chain state extensions
    ("1007", 100),
    ("1062", 100),
    ("1070", 5),
    ("1080", 10),
    // proof verification over bounded inputs
    ("2401", 1200),
    ("2402", 1300),
    ("2403", 1400),
    ("2404", 1500),
    ("2405", 1600),
    ("2406", 1700),
    ("2407", 1800),
    ("2408", 1900),
    ("2409", 2000),
    ("2410", 2100),
    ("2411", 2200),
    ("2412", 2300),
    ("2413", 2400),
    ("2414", 2500),
    // signature verification over bounded messages
    ("2500", 47),
    ("2501", 57),
    ("2502", 70),
    ("2503", 93),
    ("2600", 500),
    ("2601", 550),
    ("2602", 625),
    ("2603", 750),
    // hashing over bounded messages
    ("2700", 10),
    ("2701", 25),
    ("2702", 50),
    ("2703", 100),
    ("2800", 10),
    ("2801", 25),
    ("2802", 50),
    ("2803", 100),
    ("2900", 10),
    ("2901", 25),
    ("2902", 50),
    ("2903", 100),
];
