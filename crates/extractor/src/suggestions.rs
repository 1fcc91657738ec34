/// Fixed template table for missing required entities — spec.md §4.2.
pub fn suggestion_for(entity_type: &str) -> String {
    match entity_type {
        "amount" => "What amount would you like to transfer?".to_string(),
        "from_account" => "Which account should this come from?".to_string(),
        "to_account" => "Which account should this go to?".to_string(),
        "account_id" | "account_name" | "account_type" => "Which account are you referring to?".to_string(),
        "recipient" | "recipient_account" | "recipient_name" => "Who would you like to send this to?".to_string(),
        "routing_number" => "What's the routing number for that account?".to_string(),
        "card_id" => "Which card are you referring to?".to_string(),
        "date" | "date_range" => "When would you like this to happen?".to_string(),
        "phone" => "What's the phone number?".to_string(),
        "email" => "What's the email address?".to_string(),
        "memo" => "Would you like to add a memo?".to_string(),
        "transaction_id" => "Which transaction are you referring to?".to_string(),
        other => format!("Could you provide your {other}?"),
    }
}
