use crate::types::{AuthLevel, RiskLevel};

/// Plain-data description of one intent, compiled into an `Intent` by
/// `IntentCatalog::new`. Mirrors `BankingIntent` in the original catalog.
pub struct Seed {
    pub id: &'static str,
    pub name: &'static str,
    pub category: &'static str,
    pub subcategory: &'static str,
    pub description: &'static str,
    pub confidence_threshold: f64,
    pub risk_level: RiskLevel,
    pub auth_required: AuthLevel,
    pub required_entities: &'static [&'static str],
    pub optional_entities: &'static [&'static str],
    pub example_utterances: &'static [&'static str],
    pub keywords: &'static [&'static str],
    pub patterns: &'static [&'static str],
    pub preconditions: &'static [&'static str],
    pub daily_limit: Option<u32>,
    pub timeout_ms: u64,
    pub max_retries: u32,
}

use AuthLevel::*;
use RiskLevel::*;

pub const SEEDS: &[Seed] = &[
    Seed {
        id: "accounts.balance.check",
        name: "Check Account Balance",
        category: "Account Management",
        subcategory: "Balance Inquiry",
        description: "View current account balance or navigate to accounts overview",
        confidence_threshold: 0.92,
        risk_level: Low,
        auth_required: None,
        required_entities: &["account_id"],
        optional_entities: &["account_type", "account_name", "currency"],
        example_utterances: &[
            "What's my balance?",
            "How much money do I have?",
            "Check my account",
            "Show me my balance",
            "What's in my checking account?",
            "Show me my accounts",
            "Take me to accounts",
        ],
        keywords: &[
            "balance", "how much money", "available funds", "account balance",
            "checking balance", "savings balance", "what's my balance", "show accounts",
            "my accounts", "accounts page", "account overview", "take me to",
        ],
        patterns: &[
            r"\b(what('s| is) my|check|show) .* balance\b",
            r"\bhow much .* (have|available|left)\b",
            r"\b(available|current) (funds|balance)\b",
            r"\b(show|go to|take me to|navigate to) .* accounts?\b",
        ],
        preconditions: &["account_exists"],
        daily_limit: Some(1000),
        timeout_ms: 1000,
        max_retries: 3,
    },
    Seed {
        id: "accounts.balance.history",
        name: "View Balance History",
        category: "Account Management",
        subcategory: "Balance Inquiry",
        description: "View historical balance trends",
        confidence_threshold: 0.85,
        risk_level: Low,
        auth_required: Basic,
        required_entities: &["account_id"],
        optional_entities: &["date_range", "format"],
        example_utterances: &[
            "Show balance history",
            "Balance trends",
            "Historical balances",
            "How has my balance changed?",
        ],
        keywords: &["balance", "history", "past", "historical", "trends", "over time"],
        patterns: &[
            r"\bbalance .* (history|trends|over time)\b",
            r"\b(historical|past) .* balance\b",
        ],
        preconditions: &["account_exists"],
        daily_limit: Some(100),
        timeout_ms: 2000,
        max_retries: 3,
    },
    Seed {
        id: "accounts.statement.download",
        name: "Download Statement",
        category: "Account Management",
        subcategory: "Statements",
        description: "Download account statements",
        confidence_threshold: 0.9,
        risk_level: Low,
        auth_required: Full,
        required_entities: &["account_id", "statement_period"],
        optional_entities: &["format", "delivery_method"],
        example_utterances: &[
            "Download my statement",
            "Get statement PDF",
            "Export statement",
            "I need my bank statement",
        ],
        keywords: &["download", "statement", "pdf", "export", "document"],
        patterns: &[
            r"\b(download|get|send|export) .* statement\b",
            r"\bstatement .* (pdf|download|email)\b",
        ],
        preconditions: &["account_exists", "period_available"],
        daily_limit: Some(50),
        timeout_ms: 5000,
        max_retries: 3,
    },
    Seed {
        id: "accounts.statement.view",
        name: "View Statement",
        category: "Account Management",
        subcategory: "Statements",
        description: "View online statements",
        confidence_threshold: 0.9,
        risk_level: Low,
        auth_required: Basic,
        required_entities: &["account_id"],
        optional_entities: &["statement_period"],
        example_utterances: &["Show my statement", "View transactions", "Online statement"],
        keywords: &["view", "show", "statement", "online", "transactions", "display"],
        patterns: &[r"\b(view|show|display) .* statement\b", r"\bonline statement\b"],
        preconditions: &["account_exists"],
        daily_limit: Some(200),
        timeout_ms: 3000,
        max_retries: 3,
    },
    Seed {
        id: "accounts.alerts.setup",
        name: "Setup Account Alerts",
        category: "Account Management",
        subcategory: "Notifications",
        description: "Configure balance/transaction alerts",
        confidence_threshold: 0.85,
        risk_level: Low,
        auth_required: Basic,
        required_entities: &["alert_type"],
        optional_entities: &["threshold", "delivery_method"],
        example_utterances: &["Setup alerts", "Configure notifications", "Balance alerts"],
        keywords: &["setup", "alerts", "notifications", "configure", "balance", "transaction"],
        patterns: &[r"\b(setup|set up|configure) .* (alerts|notifications)\b", r"\b(balance|transaction) alerts\b"],
        preconditions: &["account_exists"],
        daily_limit: Some(20),
        timeout_ms: 3000,
        max_retries: 3,
    },
    Seed {
        id: "accounts.close.request",
        name: "Close Account Request",
        category: "Account Management",
        subcategory: "Lifecycle",
        description: "Request to close account",
        confidence_threshold: 0.9,
        risk_level: High,
        auth_required: Full,
        required_entities: &["account_id", "reason"],
        optional_entities: &["transfer_destination"],
        example_utterances: &["Close my account", "Shut down account", "Cancel account"],
        keywords: &["close", "shut down", "cancel", "terminate", "account"],
        patterns: &[r"\b(close|shut down|cancel|terminate) .* account\b", r"\bdelete .* account\b"],
        preconditions: &["account_exists", "zero_balance", "no_pending_transactions"],
        daily_limit: Some(5),
        timeout_ms: 10000,
        max_retries: 3,
    },
    Seed {
        id: "payments.transfer.internal",
        name: "Internal Transfer",
        category: "Transfers",
        subcategory: "Internal",
        description: "Transfer between own accounts",
        confidence_threshold: 0.95,
        risk_level: Medium,
        auth_required: Full,
        required_entities: &["amount", "from_account", "to_account"],
        optional_entities: &["memo", "schedule_date"],
        example_utterances: &[
            "Transfer money between my accounts",
            "Move funds to savings",
            "Transfer $500 from checking to savings",
            "Move money to my other account",
            "Internal transfer",
        ],
        keywords: &[
            "transfer", "move money", "between accounts", "move to savings",
            "move to checking", "internal transfer", "transfers",
        ],
        patterns: &[
            r"\btransfer .* (to|from|between) .* account\b",
            r"\bmove .* (to|from) (savings|checking)\b",
            r"\b(internal|between) .* transfer\b",
        ],
        preconditions: &["balance_check", "accounts_active", "same_customer"],
        daily_limit: Some(200),
        timeout_ms: 4000,
        max_retries: 3,
    },
    Seed {
        id: "payments.transfer.external",
        name: "External Transfer",
        category: "Transfers",
        subcategory: "External",
        description: "Transfer to external account",
        confidence_threshold: 0.9,
        risk_level: High,
        auth_required: Challenge,
        required_entities: &["amount", "recipient_account", "recipient_name"],
        optional_entities: &["routing_number", "bank_name", "memo", "wire_type"],
        example_utterances: &[
            "Send money to another bank",
            "Wire transfer to external account",
            "Send $1000 to John at Chase",
            "Transfer to different bank",
            "External transfer",
        ],
        keywords: &["external", "wire", "send", "another bank", "different bank", "transfer"],
        patterns: &[
            r"\b(wire|send) .* to .* (bank|account)\b",
            r"\bexternal .* transfer\b",
            r"\btransfer .* (different|another) bank\b",
        ],
        preconditions: &["balance_check", "limit_check", "fraud_check"],
        daily_limit: Some(20),
        timeout_ms: 15000,
        max_retries: 1,
    },
    Seed {
        id: "payments.p2p.send",
        name: "Send P2P Payment",
        category: "Payments",
        subcategory: "P2P",
        description: "Send person-to-person payment",
        confidence_threshold: 0.9,
        risk_level: Medium,
        auth_required: Full,
        required_entities: &["amount", "recipient"],
        optional_entities: &["memo", "payment_method"],
        example_utterances: &[
            "Send money to a friend",
            "Pay John $50",
            "Zelle $100 to Sarah",
            "Venmo Mike for dinner",
            "Send cash to mom",
        ],
        keywords: &["send", "pay", "zelle", "venmo", "p2p", "friend", "person"],
        patterns: &[
            r"\b(send|pay) .* to .* (friend|person|someone)\b",
            r"\b(zelle|venmo|paypal) .* to\b",
            r"\bp2p .* payment\b",
        ],
        preconditions: &["balance_check", "recipient_enrolled"],
        daily_limit: Some(100),
        timeout_ms: 6000,
        max_retries: 3,
    },
    Seed {
        id: "payments.bill.pay",
        name: "Pay Bill",
        category: "Payments",
        subcategory: "Bill Pay",
        description: "Make bill payment or navigate to bill pay hub",
        confidence_threshold: 0.9,
        risk_level: Medium,
        auth_required: Full,
        required_entities: &[],
        optional_entities: &["payee", "amount", "account_id", "due_date", "memo"],
        example_utterances: &[
            "Pay my bill",
            "Make payment",
            "Bill pay",
            "Pay electric bill",
            "Send payment to utility company",
        ],
        keywords: &["pay", "bill", "payment", "payee", "utility", "electric", "water", "bill pay"],
        patterns: &[
            r"\bpay .* bill\b",
            r"\bbill pay\b",
            r"\bmake .* payment\b",
            r"\bpay .* (electric|water|gas|utility)\b",
        ],
        preconditions: &["balance_check", "payee_exists"],
        daily_limit: Some(100),
        timeout_ms: 5000,
        max_retries: 3,
    },
    Seed {
        id: "cards.block.temporary",
        name: "Block Card",
        category: "Cards",
        subcategory: "Security",
        description: "Temporarily block card",
        confidence_threshold: 0.9,
        risk_level: High,
        auth_required: Full,
        required_entities: &["card_identifier"],
        optional_entities: &["reason", "duration"],
        example_utterances: &[
            "Block my card temporarily",
            "Freeze my debit card",
            "Temporarily disable my card",
            "Pause my credit card",
            "Lock my card for now",
        ],
        keywords: &["block", "freeze", "lock", "disable", "temporary", "pause", "card"],
        patterns: &[
            r"\b(block|freeze|lock|disable) .* card\b",
            r"\bcard .* (lost|stolen|missing)\b",
            r"\btemporarily .* (block|freeze) .* card\b",
        ],
        preconditions: &["card_active"],
        daily_limit: Some(50),
        timeout_ms: 2000,
        max_retries: 3,
    },
    Seed {
        id: "cards.replace.lost",
        name: "Replace Lost Card",
        category: "Cards",
        subcategory: "Replacement",
        description: "Order replacement for lost card",
        confidence_threshold: 0.9,
        risk_level: High,
        auth_required: Full,
        required_entities: &["card_id"],
        optional_entities: &["expedited", "delivery_address"],
        example_utterances: &["I lost my card", "Can't find my debit card", "My credit card is missing", "Need a replacement card"],
        keywords: &["lost", "missing", "can't find", "replacement", "new card", "report"],
        patterns: &[r"\b(lost|missing|can't find) .* card\b", r"\bneed .* (replacement|new) card\b"],
        preconditions: &["card_exists", "eligible_for_replacement"],
        daily_limit: Some(5),
        timeout_ms: 6000,
        max_retries: 3,
    },
    Seed {
        id: "cards.activate",
        name: "Activate Card",
        category: "Cards",
        subcategory: "Activation",
        description: "Activate new card",
        confidence_threshold: 0.95,
        risk_level: Medium,
        auth_required: Full,
        required_entities: &["card_number", "cvv"],
        optional_entities: &["pin"],
        example_utterances: &["Activate my card", "Turn on new card", "Enable my debit card"],
        keywords: &["activate", "turn on", "enable", "start using", "new card"],
        patterns: &[r"\bactivate .* card\b", r"\bturn on .* card\b", r"\benable .* (debit|credit) card\b"],
        preconditions: &["card_issued", "not_activated", "identity_verified"],
        daily_limit: Some(10),
        timeout_ms: 4000,
        max_retries: 3,
    },
    Seed {
        id: "disputes.transaction.initiate",
        name: "Dispute Transaction",
        category: "Disputes",
        subcategory: "Transaction Disputes",
        description: "Initiate transaction dispute",
        confidence_threshold: 0.85,
        risk_level: High,
        auth_required: Full,
        required_entities: &["transaction_id"],
        optional_entities: &["reason", "amount", "merchant"],
        example_utterances: &[
            "I want to dispute a charge",
            "Dispute this transaction",
            "This transaction is wrong",
            "Fraudulent charge on my account",
            "I didn't make this purchase",
        ],
        keywords: &["dispute", "dispute transaction", "dispute charge", "wrong", "fraud", "unauthorized", "charge"],
        patterns: &[
            r"\b(dispute|report) .* (transaction|charge|payment)\b",
            r"\b(fraudulent|unauthorized|wrong) .* charge\b",
        ],
        preconditions: &["within_dispute_window", "transaction_posted"],
        daily_limit: Some(10),
        timeout_ms: 10000,
        max_retries: 3,
    },
    Seed {
        id: "support.agent.request",
        name: "Request Agent",
        category: "Support",
        subcategory: "Agent Assistance",
        description: "Request human agent assistance",
        confidence_threshold: 0.9,
        risk_level: Low,
        auth_required: Basic,
        required_entities: &[],
        optional_entities: &["reason", "priority"],
        example_utterances: &["Talk to an agent", "I need human help", "Connect me to customer service"],
        keywords: &["agent", "human", "representative", "customer service", "talk", "speak"],
        patterns: &[r"\b(talk|speak|connect) .* (agent|representative|human)\b", r"\bcustomer .* service\b"],
        preconditions: &["hours_check"],
        daily_limit: Some(100),
        timeout_ms: 2000,
        max_retries: 3,
    },
    Seed {
        id: "inquiries.transaction.search",
        name: "Search Transactions",
        category: "Inquiries",
        subcategory: "Transactions",
        description: "Search transaction history",
        confidence_threshold: 0.8,
        risk_level: Low,
        auth_required: Basic,
        required_entities: &[],
        optional_entities: &["date_range", "merchant", "amount_range", "category"],
        example_utterances: &["Show my transactions", "Recent purchases", "Transaction history", "What did I spend at Target?"],
        keywords: &["transaction", "history", "recent", "purchase", "spent", "activity", "payments"],
        patterns: &[r"\b(show|view|see) .* transaction\b", r"\b(recent|last) .* (transactions|purchases|activity)\b"],
        preconditions: &["account_exists"],
        daily_limit: Some(500),
        timeout_ms: 3000,
        max_retries: 3,
    },
    Seed {
        id: "lending.apply.personal",
        name: "Apply Personal Loan",
        category: "Lending",
        subcategory: "Personal",
        description: "Apply for personal loan",
        confidence_threshold: 0.85,
        risk_level: Medium,
        auth_required: Full,
        required_entities: &["loan_type", "amount", "term"],
        optional_entities: &["purpose", "collateral"],
        example_utterances: &["Apply for a personal loan", "I need to borrow money", "Get a loan for $10000"],
        keywords: &["loan", "borrow", "personal loan", "apply", "application"],
        patterns: &[r"\bapply .* (personal )?loan\b", r"\bneed .* (borrow|loan)\b"],
        preconditions: &["credit_check", "income_verification"],
        daily_limit: Some(2),
        timeout_ms: 60000,
        max_retries: 3,
    },
    Seed {
        id: "investments.portfolio.view",
        name: "View Portfolio",
        category: "Investments",
        subcategory: "Portfolio",
        description: "View investment portfolio",
        confidence_threshold: 0.9,
        risk_level: Low,
        auth_required: Full,
        required_entities: &[],
        optional_entities: &["account_type", "time_period"],
        example_utterances: &["Show my portfolio", "How are my investments doing?", "Check my stocks"],
        keywords: &["portfolio", "investments", "stocks", "performance", "holdings"],
        patterns: &[r"\b(show|view) .* portfolio\b", r"\bhow .* investments .* doing\b"],
        preconditions: &["has_investment_account"],
        daily_limit: Some(500),
        timeout_ms: 3000,
        max_retries: 3,
    },
    Seed {
        id: "authentication.login",
        name: "Login",
        category: "Authentication",
        subcategory: "Access",
        description: "User login authentication",
        confidence_threshold: 0.95,
        risk_level: Medium,
        auth_required: None,
        required_entities: &["username"],
        optional_entities: &["password"],
        example_utterances: &["Log me in", "I want to login", "Sign in", "Access my account"],
        keywords: &["login", "log in", "sign in", "access", "authenticate"],
        patterns: &[r"\b(log|sign) .* in\b", r"\blogin\b", r"\baccess .* account\b"],
        preconditions: &["valid_credentials"],
        daily_limit: Some(50),
        timeout_ms: 5000,
        max_retries: 3,
    },
    Seed {
        id: "authentication.logout",
        name: "Logout",
        category: "Authentication",
        subcategory: "Access",
        description: "User logout",
        confidence_threshold: 0.95,
        risk_level: Low,
        auth_required: Basic,
        required_entities: &[],
        optional_entities: &[],
        example_utterances: &["Log me out", "Sign out", "Logout", "End session", "Exit"],
        keywords: &["logout", "log out", "sign out", "exit", "end session"],
        patterns: &[r"\b(log|sign) .* out\b", r"\blogout\b", r"\bexit\b"],
        preconditions: &["authenticated"],
        daily_limit: Some(100),
        timeout_ms: 1000,
        max_retries: 3,
    },
    Seed {
        id: "profile.update.contact",
        name: "Update Contact Information",
        category: "Profile",
        subcategory: "Contact",
        description: "Update email, phone, or address",
        confidence_threshold: 0.85,
        risk_level: Medium,
        auth_required: Full,
        required_entities: &["contact_type"],
        optional_entities: &["new_value"],
        example_utterances: &["Update my email", "Change my phone number", "Update address"],
        keywords: &["update", "change", "modify", "email", "phone", "address", "contact"],
        patterns: &[r"\b(update|change|modify) .* (email|phone|address|contact)\b", r"\bnew .* (email|phone|address)\b"],
        preconditions: &["identity_verified"],
        daily_limit: Some(10),
        timeout_ms: 5000,
        max_retries: 3,
    },
    Seed {
        id: "cards.pin.change",
        name: "Change Card PIN",
        category: "Cards",
        subcategory: "PIN Management",
        description: "Change card PIN number",
        confidence_threshold: 0.9,
        risk_level: High,
        auth_required: Full,
        required_entities: &["card_id", "new_pin"],
        optional_entities: &["old_pin"],
        example_utterances: &["Change my PIN", "Update card PIN", "New PIN for my debit card"],
        keywords: &["change", "update", "new", "reset", "modify", "pin"],
        patterns: &[r"\b(change|update|new|reset|modify) .* pin\b", r"\bpin .* (change|update|reset)\b"],
        preconditions: &["card_active", "pin_format_valid"],
        daily_limit: Some(5),
        timeout_ms: 3000,
        max_retries: 3,
    },
    Seed {
        id: "cards.limit.increase",
        name: "Increase Card Limit",
        category: "Cards",
        subcategory: "Limits",
        description: "Request credit limit increase",
        confidence_threshold: 0.85,
        risk_level: Medium,
        auth_required: Full,
        required_entities: &["card_id", "new_limit"],
        optional_entities: &["reason"],
        example_utterances: &["Increase my credit limit", "Raise card limit", "Higher credit limit"],
        keywords: &["increase", "raise", "higher", "credit limit", "spending limit", "limit"],
        patterns: &[r"\b(increase|raise|higher) .* (credit |spending )?limit\b", r"\blimit .* (increase|raise)\b"],
        preconditions: &["within_allowed_range", "credit_check_pass"],
        daily_limit: Some(10),
        timeout_ms: 5000,
        max_retries: 3,
    },
    Seed {
        id: "payments.bill.schedule",
        name: "Schedule Bill Payment",
        category: "Payments",
        subcategory: "Bill Pay",
        description: "Schedule future bill payment",
        confidence_threshold: 0.85,
        risk_level: Medium,
        auth_required: Full,
        required_entities: &["payee", "amount", "due_date"],
        optional_entities: &["account_id", "memo"],
        example_utterances: &["Schedule bill payment", "Pay later", "Future payment", "Schedule payment for next week"],
        keywords: &["schedule", "pay later", "future payment", "payment for", "set up payment"],
        patterns: &[r"\bschedule .* payment\b", r"\bpay .* later\b", r"\bfuture payment\b"],
        preconditions: &["balance_check", "payee_exists"],
        daily_limit: Some(50),
        timeout_ms: 5000,
        max_retries: 3,
    },
    Seed {
        id: "payments.recurring.setup",
        name: "Setup Recurring Payment",
        category: "Payments",
        subcategory: "Recurring",
        description: "Setup recurring bill payment",
        confidence_threshold: 0.85,
        risk_level: Medium,
        auth_required: Full,
        required_entities: &["payee", "amount", "frequency"],
        optional_entities: &["start_date", "end_date"],
        example_utterances: &["Setup autopay", "Recurring payment", "Monthly payment", "Automatic bill pay"],
        keywords: &["autopay", "recurring", "monthly", "automatic", "recurring transfer"],
        patterns: &[r"\b(setup|set up) .* (autopay|recurring|automatic)\b", r"\b(monthly|weekly|recurring) .* payment\b", r"\bautopay\b"],
        preconditions: &["balance_check", "payee_exists"],
        daily_limit: Some(20),
        timeout_ms: 5000,
        max_retries: 3,
    },
    Seed {
        id: "payments.status.check",
        name: "Check Payment Status",
        category: "Payments",
        subcategory: "Status",
        description: "Check status of payment",
        confidence_threshold: 0.9,
        risk_level: Low,
        auth_required: Basic,
        required_entities: &["payment_id"],
        optional_entities: &["date_range"],
        example_utterances: &["Payment status", "Is payment sent", "Check if paid", "Did my payment go through"],
        keywords: &["payment status", "is payment", "check if paid", "payment go through", "status"],
        patterns: &[r"\bpayment status\b", r"\bis .* payment .* sent\b", r"\bcheck if .* paid\b"],
        preconditions: &["payment_exists"],
        daily_limit: Some(200),
        timeout_ms: 2000,
        max_retries: 3,
    },
    Seed {
        id: "lending.apply.mortgage",
        name: "Apply for Mortgage",
        category: "Lending",
        subcategory: "Mortgage",
        description: "Apply for home mortgage loan",
        confidence_threshold: 0.85,
        risk_level: High,
        auth_required: Full,
        required_entities: &["loan_amount", "property_value", "down_payment"],
        optional_entities: &["property_type", "employment_info"],
        example_utterances: &["Apply for mortgage", "Home loan application", "Mortgage loan", "Buy a house loan"],
        keywords: &["mortgage", "home loan", "house loan", "property loan", "mortgage application"],
        patterns: &[r"\b(apply|application) .* mortgage\b", r"\bhome loan\b", r"\bbuy .* house .* loan\b"],
        preconditions: &["credit_check", "income_verification", "property_appraisal"],
        daily_limit: Some(2),
        timeout_ms: 120000,
        max_retries: 3,
    },
    Seed {
        id: "lending.payment.make",
        name: "Make Loan Payment",
        category: "Lending",
        subcategory: "Payments",
        description: "Make payment on existing loan",
        confidence_threshold: 0.9,
        risk_level: Medium,
        auth_required: Full,
        required_entities: &["loan_id", "amount"],
        optional_entities: &["payment_type", "source_account"],
        example_utterances: &["Pay my loan", "Make loan payment", "Pay mortgage", "Pay off loan"],
        keywords: &["pay loan", "loan payment", "pay mortgage", "pay off", "loan"],
        patterns: &[r"\bpay .* (loan|mortgage)\b", r"\bloan payment\b", r"\bpay off .* loan\b"],
        preconditions: &["loan_active", "payment_due"],
        daily_limit: Some(50),
        timeout_ms: 5000,
        max_retries: 3,
    },
    Seed {
        id: "investments.buy.stock",
        name: "Buy Stock",
        category: "Investments",
        subcategory: "Trading",
        description: "Purchase stock shares",
        confidence_threshold: 0.85,
        risk_level: High,
        auth_required: Full,
        required_entities: &["symbol", "quantity", "order_type"],
        optional_entities: &["limit_price", "source_account"],
        example_utterances: &["Buy stock", "Purchase shares", "Invest in AAPL", "Buy 10 shares of Tesla"],
        keywords: &["buy stock", "purchase shares", "invest in", "buy shares", "stock purchase"],
        patterns: &[r"\bbuy .* stock\b", r"\bpurchase .* shares\b", r"\bbuy .* shares .* of\b"],
        preconditions: &["market_open", "balance_check", "symbol_valid"],
        daily_limit: Some(100),
        timeout_ms: 8000,
        max_retries: 3,
    },
    Seed {
        id: "investments.sell.stock",
        name: "Sell Stock",
        category: "Investments",
        subcategory: "Trading",
        description: "Sell stock shares",
        confidence_threshold: 0.85,
        risk_level: High,
        auth_required: Full,
        required_entities: &["symbol", "quantity", "order_type"],
        optional_entities: &["limit_price"],
        example_utterances: &["Sell stock", "Sell shares", "Sell my AAPL", "Sell 10 shares of Tesla"],
        keywords: &["sell stock", "sell shares", "sell my", "stock sale", "liquidate"],
        patterns: &[r"\bsell .* stock\b", r"\bsell .* shares\b", r"\bsell .* shares .* of\b"],
        preconditions: &["position_check", "market_open", "symbol_valid"],
        daily_limit: Some(100),
        timeout_ms: 8000,
        max_retries: 3,
    },
    Seed {
        id: "security.password.reset",
        name: "Reset Password",
        category: "Security",
        subcategory: "Password",
        description: "Reset account password",
        confidence_threshold: 0.9,
        risk_level: High,
        auth_required: Challenge,
        required_entities: &["username", "new_password"],
        optional_entities: &["security_questions", "otp"],
        example_utterances: &["Reset my password", "Change password", "Forgot my password", "New password"],
        keywords: &["reset password", "change password", "forgot password", "new password", "password"],
        patterns: &[r"\b(reset|change|forgot) .* password\b", r"\bnew password\b"],
        preconditions: &["identity_verified", "password_complexity_met"],
        daily_limit: Some(10),
        timeout_ms: 5000,
        max_retries: 3,
    },
    Seed {
        id: "security.2fa.setup",
        name: "Setup Two-Factor Authentication",
        category: "Security",
        subcategory: "2FA",
        description: "Setup two-factor authentication",
        confidence_threshold: 0.85,
        risk_level: Medium,
        auth_required: Full,
        required_entities: &["2fa_method"],
        optional_entities: &["phone_number", "email"],
        example_utterances: &["Setup 2FA", "Two-factor authentication", "Enable 2FA"],
        keywords: &["2fa", "two-factor", "authentication", "security verification", "setup"],
        patterns: &[r"\bsetup .* (2fa|two.?factor)\b", r"\b(enable|turn on) .* 2fa\b"],
        preconditions: &["authenticated", "valid_2fa_method"],
        daily_limit: Some(5),
        timeout_ms: 4000,
        max_retries: 3,
    },
    Seed {
        id: "onboarding.account.open",
        name: "Open New Account",
        category: "Onboarding",
        subcategory: "Account Opening",
        description: "Open a new bank account",
        confidence_threshold: 0.85,
        risk_level: Medium,
        auth_required: Full,
        required_entities: &["account_type", "funding_amount"],
        optional_entities: &["promo_code", "branch_code"],
        example_utterances: &["Open new account", "Start a checking account", "New savings account"],
        keywords: &["open account", "new account", "start account", "create account", "open", "checking", "savings"],
        patterns: &[r"\b(open|start|create) .* (new )?account\b", r"\bnew .* (checking|savings) account\b"],
        preconditions: &["eligibility_check", "identity_verified", "min_deposit_check"],
        daily_limit: Some(5),
        timeout_ms: 30000,
        max_retries: 3,
    },
    Seed {
        id: "business.account.open",
        name: "Open Business Account",
        category: "Business Banking",
        subcategory: "Account Opening",
        description: "Open business banking account",
        confidence_threshold: 0.85,
        risk_level: Medium,
        auth_required: Full,
        required_entities: &["business_type", "account_type"],
        optional_entities: &["ein", "business_name"],
        example_utterances: &["Open business account", "Business banking account", "Corporate account"],
        keywords: &["business account", "business banking", "corporate account", "company banking"],
        patterns: &[r"\bbusiness .* account\b", r"\bcorporate .* account\b", r"\bcompany .* banking\b"],
        preconditions: &["business_verification", "ein_valid", "authorized_signatory"],
        daily_limit: Some(3),
        timeout_ms: 45000,
        max_retries: 3,
    },
    Seed {
        id: "cash.deposit.schedule",
        name: "Schedule Cash Deposit",
        category: "Cash Management",
        subcategory: "Deposits",
        description: "Schedule cash deposit appointment",
        confidence_threshold: 0.85,
        risk_level: Low,
        auth_required: Basic,
        required_entities: &["amount", "deposit_date"],
        optional_entities: &["branch_location", "denomination"],
        example_utterances: &["Schedule cash deposit", "Deposit cash", "Cash deposit appointment"],
        keywords: &["cash deposit", "deposit cash", "schedule deposit", "bring cash", "deposit appointment"],
        patterns: &[r"\b(schedule|make) .* (cash )?deposit\b", r"\bdeposit .* cash\b"],
        preconditions: &["account_exists", "branch_available"],
        daily_limit: Some(20),
        timeout_ms: 3000,
        max_retries: 3,
    },
    Seed {
        id: "international.wire.send",
        name: "International Wire Transfer",
        category: "International",
        subcategory: "Wire Transfers",
        description: "Send international wire transfer or navigate to wire transfer form",
        confidence_threshold: 0.85,
        risk_level: High,
        auth_required: Challenge,
        required_entities: &["amount", "currency", "recipient_account", "recipient", "swift_code"],
        optional_entities: &["purpose", "memo", "recipient_country", "correspondent_bank"],
        example_utterances: &[
            "International wire transfer",
            "Send money abroad",
            "SWIFT transfer",
            "Wire to another country",
            "International money transfer",
        ],
        keywords: &["international wire", "send money abroad", "swift", "wire abroad", "international transfer"],
        patterns: &[
            r"\binternational .* (wire|transfer)\b",
            r"\bsend money .* abroad\b",
            r"\bswift .* transfer\b",
            r"\bwire .* (country|abroad|international)\b",
        ],
        preconditions: &["balance_check", "kyc_check", "sanctions_check", "limit_check"],
        daily_limit: Some(10),
        timeout_ms: 20000,
        max_retries: 1,
    },
];
