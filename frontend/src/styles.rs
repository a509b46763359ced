pub const CONTAINER: &str = "min-h-screen bg-gray-50 dark:bg-gray-900 w-full px-4 sm:px-6 lg:px-8 py-6 flex flex-col items-center gap-4";
pub const WHEEL_FRAME: &str = "w-full max-w-xl aspect-square";
pub const WHEEL_CANVAS: &str = "w-full h-full cursor-pointer select-none";
pub const CONTROLS: &str = "w-full max-w-xl flex items-center gap-4";
pub const SLIDER: &str = "flex-1 accent-blue-600";
pub const BUTTON_PRIMARY: &str = "inline-flex items-center justify-center px-4 py-2 rounded-lg font-medium text-white bg-gradient-to-r from-blue-600 to-blue-700 hover:from-blue-700 hover:to-blue-800 shadow-lg transition-all duration-300";
pub const TEXT_LABEL: &str = "w-full max-w-xl h-24";
pub const IMAGE: &str = "w-full max-w-xl rounded-lg shadow-lg";
