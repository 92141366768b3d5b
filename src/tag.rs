//! FIX tag numbers.
//!
//! A `Tag` is just the wire integer; the crate does not hand out a closed
//! enum because schemas are supplied by the caller (see [`crate::schema`])
//! and may reference tags this crate has never heard of. The constants below
//! cover the header/trailer and the demonstration schemas used in the test
//! suite and doc examples.

/// A FIX tag number. Always positive on the wire; 0 is reserved internally
/// to mark an empty node-store slot.
pub type Tag = u32;

// Header / trailer -------------------------------------------------------
pub const BEGIN_STRING: Tag = 8;
pub const BODY_LENGTH: Tag = 9;
pub const CHECK_SUM: Tag = 10;
pub const MSG_TYPE: Tag = 35;
pub const MSG_SEQ_NUM: Tag = 34;
pub const SENDER_COMP_ID: Tag = 49;
pub const TARGET_COMP_ID: Tag = 56;
pub const SENDING_TIME: Tag = 52;
pub const POSS_DUP_FLAG: Tag = 43;
pub const ORIG_SENDING_TIME: Tag = 122;

// NewOrderSingle-ish (S1) --------------------------------------------------
pub const ACCOUNT: Tag = 1;
pub const CL_ORD_ID: Tag = 11;
pub const HANDL_INST: Tag = 21;
pub const SYMBOL: Tag = 55;
pub const ORD_TYPE: Tag = 40;
pub const PRICE: Tag = 44;
pub const SIDE: Tag = 54;
pub const TIME_IN_FORCE: Tag = 59;
pub const TRANSACT_TIME: Tag = 60;
pub const CURRENCY: Tag = 15;
pub const ORDER_QTY: Tag = 38;

// ExecutionReport breadth --------------------------------------------------
pub const ORDER_ID: Tag = 37;
pub const EXEC_ID: Tag = 17;
pub const EXEC_TYPE: Tag = 150;
pub const ORD_STATUS: Tag = 39;
pub const LEAVES_QTY: Tag = 151;
pub const CUM_QTY: Tag = 14;
pub const AVG_PX: Tag = 6;

// MarketDataSnapshot (S2/S3) -----------------------------------------------
pub const MD_REQ_ID: Tag = 262;
pub const NO_MD_ENTRIES: Tag = 268;
pub const MD_UPDATE_ACTION: Tag = 279;
pub const MD_ENTRY_TYPE: Tag = 269;
pub const MD_ENTRY_ID: Tag = 278;
pub const MD_ENTRY_PX: Tag = 270;
pub const MD_ENTRY_SIZE: Tag = 271;
pub const NUM_REPORTS: Tag = 346;

// NoPartyIDs / nested parties ----------------------------------------------
pub const NO_PARTY_IDS: Tag = 453;
pub const PARTY_ID: Tag = 448;
pub const PARTY_ID_SOURCE: Tag = 447;
pub const PARTY_ROLE: Tag = 452;
pub const NO_NESTED_PARTY_IDS: Tag = 539;
pub const NESTED_PARTY_ID: Tag = 524;
pub const NESTED_PARTY_ID_SOURCE: Tag = 525;
pub const NESTED_PARTY_ROLE: Tag = 538;

// NoMiscFees ----------------------------------------------------------------
pub const NO_MISC_FEES: Tag = 136;
pub const MISC_FEE_AMT: Tag = 137;
pub const MISC_FEE_CURR: Tag = 138;
pub const MISC_FEE_TYPE: Tag = 139;

// NoRoutingIDs ----------------------------------------------------------------
pub const NO_ROUTING_IDS: Tag = 215;
pub const ROUTING_TYPE: Tag = 216;
pub const ROUTING_ID: Tag = 217;

// NoContAmts ----------------------------------------------------------------
pub const NO_CONT_AMTS: Tag = 518;
pub const CONT_AMT_VALUE: Tag = 519;
pub const CONT_AMT_TYPE: Tag = 520;
pub const CONT_AMT_CURR: Tag = 521;

// NoAllocs ----------------------------------------------------------------
pub const NO_ALLOCS: Tag = 78;
pub const ALLOC_ACCOUNT: Tag = 79;
pub const ALLOC_SHARES: Tag = 80;

// Raw data convention (length tag, data tag) pairs --------------------------
pub const RAW_DATA_LENGTH: Tag = 95;
pub const RAW_DATA: Tag = 96;
pub const XML_DATA_LEN: Tag = 212;
pub const XML_DATA: Tag = 213;

// Session-layer (used only by demo Logon/Logout schemas in tests) ----------
pub const ENCRYPT_METHOD: Tag = 98;
pub const HEART_BT_INT: Tag = 108;
pub const RESET_SEQ_NUM_FLAG: Tag = 141;
pub const TEXT: Tag = 58;
