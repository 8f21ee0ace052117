mod ruleset_parsing;
