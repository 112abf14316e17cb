//! Boot script: the fixed log lines plus destination-specific trailer.

use linkboot_engine::{Category, DisplayLine};

use crate::destinations::Destination;

use Category::{Error as Failed, Info, Ok as Done, Plain, Warning};

/// Title bar of the boot screen.
pub const HEADER: &str = "GNU GRUB tcp.dns version 2.52";

/// Text under the progress bar.
pub const FOOTER: &str =
    "Welcome to tcp.dns version 2.52. Click an option to start the boot process.";

/// Shown while the redirect is pending.
pub const CONNECTING_TITLE: &str = "CONNECTING...";
pub const CONNECTING_SUBTITLE: &str = "Establishing secure connection...";

/// Fixed boot log, in display order.
pub const BOOT_MESSAGES: &[(&str, Category)] = &[
    ("[Finished] Checking battery state...", Done),
    ("Starting network services...", Plain),
    ("[Finished] tcp.dns [2.52] [DarkApple]...", Done),
    ("[Warning] Starting GRUB boot loader...", Warning),
    ("Reached target Graphical Interface...", Plain),
    ("Started GNOME Display Manager...", Plain),
    ("[Warning] Starting system logging service...", Warning),
    ("[Warning] Starting udev...", Warning),
    ("Started udev Kernel Device Manager...", Plain),
    ("Checking disk for errors...", Plain),
    ("[Finished] Starting Light Display Manager...", Done),
    ("[Finished] Stopping Light Display Manager...", Done),
    ("[Error] Starting Dispatcher Service...", Failed),
    ("[Error] Reached target Multi-User System...", Failed),
    ("Starting Daily apt download activities...", Plain),
    ("Starting Network Manager...", Plain),
    ("Started AppArmor initialization...", Plain),
    ("Starting Wait for Network to be Configured...", Plain),
    ("Starting Update UTMP about System Boot/Shutdown...", Plain),
    (
        "[Finished] Started Detect the available GPUs and deal with any system changes...",
        Done,
    ),
    ("Starting Hold until boot process finishes up...", Plain),
    ("Starting Clean up any mess left by 0dns-up...", Plain),
    ("[Warning] Reached target Login Prompts...", Warning),
    ("Initializing hardware monitoring...", Plain),
    ("Starting ACPI event daemon...", Plain),
    ("Starting D-Bus System Message Bus...", Plain),
    ("[Finished] Mounting local filesystems...", Done),
    ("Activating swap partition...", Plain),
    ("[Error] Starting Cleanup of Temporary Directories...", Failed),
    ("[Warning] Starting Set console font and keymap...", Warning),
    ("[Finished] Starting system kernel log daemon...", Done),
    ("[Warning] Starting Virtualization daemon...", Warning),
    ("[Warning] Enabling swap space...", Warning),
    ("Starting Apache Web Server...", Plain),
    ("[Warning] Starting SSH server...", Warning),
    ("[Finished] Starting MySQL database service...", Done),
    ("Mounting NFS filesystems...", Plain),
    ("[Finished] Setting up Logical Volume Manager...", Done),
    ("Starting Bluetooth services...", Plain),
    ("Enabling network interfaces...", Plain),
    ("Starting system time synchronization...", Plain),
    ("Loading kernel modules...", Plain),
    ("[Warning] Starting firewall configuration...", Warning),
    ("Initializing cryptographic services...", Plain),
    ("Starting automatic crash report generation...", Plain),
    ("Starting Disk Manager...", Plain),
    ("Applying Kernel Live Patch...", Plain),
    ("Press [key] to enter GRUB menu...", Plain),
    ("[Warning] Loading USB drivers...", Warning),
    ("Starting Printer Service...", Plain),
    ("[Warning] Checking system time...", Warning),
    ("Starting VPN service...", Plain),
    ("Applying security updates...", Plain),
    ("[Finished] Profile system loaded...", Done),
    ("[Info] tcp.dns ready...", Info),
    ("", Plain),
    ("Initializing connection protocol...", Plain),
    ("Establishing secure tunnel...", Plain),
];

/// Lines appended after the fixed log for the chosen destination.
pub fn destination_lines(destination: &Destination) -> Vec<DisplayLine> {
    vec![
        DisplayLine::blank(),
        DisplayLine::new(
            format!("[Info] Target selected: {}", destination.target()),
            Info,
        ),
        DisplayLine::plain("Configuring network protocols..."),
        DisplayLine::plain("Establishing encrypted connection..."),
        DisplayLine::new("[Finished] Connection ready", Done),
    ]
}

/// Full script for one activation.
pub fn boot_script(destination: &Destination) -> Vec<DisplayLine> {
    BOOT_MESSAGES
        .iter()
        .map(|(text, category)| DisplayLine::new(*text, *category))
        .chain(destination_lines(destination))
        .collect()
}
