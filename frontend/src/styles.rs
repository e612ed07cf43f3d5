pub const PAGE: &str = "min-h-screen flex flex-col items-center justify-center p-6";

pub const HEADING: &str = "text-5xl font-extrabold text-gray-800 mb-8 drop-shadow-lg text-center";

pub const RESULTS_CARD: &str = "bg-white p-6 rounded-xl shadow-lg flex justify-between items-center";
pub const RESULT_COLUMN: &str = "text-lg font-semibold text-gray-800";

pub const ALERT_BASE: &str = "mb-6 px-4 py-2 rounded-lg text-center";
pub const ALERT_SUCCESS: &str = "bg-green-100 text-green-800";
pub const ALERT_ERROR: &str = "bg-red-100 text-red-800";

pub const VOTE_BUTTON_BASE: &str = "text-white px-8 py-4 rounded-2xl font-semibold text-lg shadow-lg transition-all duration-300 disabled:opacity-50 disabled:cursor-not-allowed";
pub const VOTE_BUTTON_PRADHAN: &str = "bg-gradient-to-r from-green-500 to-green-700 hover:from-green-600 hover:to-green-800";
pub const VOTE_BUTTON_BANRAKAS: &str = "bg-gradient-to-r from-red-500 to-red-700 hover:from-red-600 hover:to-red-800";

pub const MODAL_BACKDROP: &str = "fixed inset-0 bg-black/30 flex items-center justify-center z-50";
pub const MODAL_CARD: &str = "bg-gradient-to-br from-white to-gray-100 p-8 rounded-2xl shadow-2xl max-w-md w-full text-center";
pub const MODAL_BUTTON_PRIMARY: &str = "px-6 py-2 bg-blue-600 text-white rounded-lg font-semibold hover:bg-blue-700 transition-colors";
pub const MODAL_BUTTON_SECONDARY: &str = "px-6 py-2 bg-gray-200 text-gray-800 rounded-lg font-semibold hover:bg-gray-300 transition-colors";

pub fn combine_classes(base: &str, additional: &str) -> String {
    format!("{} {}", base, additional)
}

pub fn alert_style(success: bool) -> String {
    if success {
        combine_classes(ALERT_BASE, ALERT_SUCCESS)
    } else {
        combine_classes(ALERT_BASE, ALERT_ERROR)
    }
}
