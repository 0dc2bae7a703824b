// Turns an upstream profile response into what the results page shows:
// the extracted résumé fields, the sectioned AI evaluation, and the raw text.

pub mod handlers;
pub mod report;
pub mod sections;
