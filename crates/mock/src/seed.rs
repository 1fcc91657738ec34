use crate::types::{Account, AccountType, Recipient};

pub fn seed_accounts() -> Vec<Account> {
    vec![
        Account {
            id: "CHK001".to_string(),
            name: "Primary Checking".to_string(),
            account_type: AccountType::Checking,
            balance: 5000.0,
            currency: "USD".to_string(),
        },
        Account {
            id: "SAV001".to_string(),
            name: "Savings".to_string(),
            account_type: AccountType::Savings,
            balance: 15000.0,
            currency: "USD".to_string(),
        },
        Account {
            id: "CHK002".to_string(),
            name: "Business Checking".to_string(),
            account_type: AccountType::Business,
            balance: 25000.0,
            currency: "USD".to_string(),
        },
    ]
}

pub fn seed_recipients() -> Vec<Recipient> {
    let r = |id: &str, name: &str, acct: &str, bank: &str, country: &str, alias: Option<&str>| Recipient {
        id: id.to_string(),
        name: name.to_string(),
        account_number: acct.to_string(),
        bank_name: bank.to_string(),
        bank_country: country.to_string(),
        alias: alias.map(str::to_string),
        routing_number: None,
        swift_code: None,
        bank_address: None,
    };

    vec![
        r("RCP001", "John Smith", "1000000001", "Mock Bank", "US", Some("Johnny")),
        r("RCP002", "John Doe", "1000000002", "Mock Bank", "US", Some("John")),
        r("RCP003", "Amy Winehouse", "1000000003", "Mock Bank", "US", Some("my mum")),
        r("RCP004", "Sarah Johnson", "2000000004", "Wells Fargo", "US", None),
        r("RCP005", "Michael Davis", "2000000005", "Chase", "US", None),
        r("RCP006", "Alice Brown", "2000000006", "Bank of America", "US", None),
        r("RCP007", "Jack White", "3000000007", "Royal Bank of Canada", "CA", None),
        r("RCP008", "Hans Mueller", "3000000008", "Deutsche Bank", "DE", None),
        r("RCP009", "Marie Dubois", "3000000009", "BNP Paribas", "FR", None),
        r("RCP010", "Erik van der Berg", "3000000010", "ABN AMRO", "NL", None),
    ]
}
