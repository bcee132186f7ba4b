use std::fmt::{Display, Formatter};
use thiserror::Error;

/// Location-service authorization status.
///
/// The numeric codes follow the platform convention where `3` and `4`
/// are the only states that unlock radio metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthorizationStatus {
    /// The user has not been asked yet, or has not answered.
    NotDetermined,
    /// Location services are disabled or restricted by policy.
    Restricted,
    /// The user refused location access for this application.
    Denied,
    /// Location access is granted at all times.
    AuthorizedAlways,
    /// Location access is granted while the application runs.
    AuthorizedWhenInUse,
    /// Unknown status code not mapped to a specific variant.
    Other(u32),
}

impl AuthorizationStatus {
    /// Returns `true` if this status is enough to run a scan.
    pub fn is_sufficient(&self) -> bool {
        matches!(self, Self::AuthorizedAlways | Self::AuthorizedWhenInUse)
    }

    /// Returns the numeric status code.
    pub fn code(&self) -> u32 {
        match self {
            Self::NotDetermined => 0,
            Self::Restricted => 1,
            Self::Denied => 2,
            Self::AuthorizedAlways => 3,
            Self::AuthorizedWhenInUse => 4,
            Self::Other(v) => *v,
        }
    }
}

impl From<u32> for AuthorizationStatus {
    fn from(code: u32) -> Self {
        match code {
            0 => Self::NotDetermined,
            1 => Self::Restricted,
            2 => Self::Denied,
            3 => Self::AuthorizedAlways,
            4 => Self::AuthorizedWhenInUse,
            v => Self::Other(v),
        }
    }
}

impl Display for AuthorizationStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotDetermined => write!(f, "not determined"),
            Self::Restricted => write!(f, "restricted"),
            Self::Denied => write!(f, "denied"),
            Self::AuthorizedAlways => write!(f, "authorized always"),
            Self::AuthorizedWhenInUse => write!(f, "authorized when in use"),
            Self::Other(v) => write!(f, "unknown status ({v})"),
        }
    }
}

/// Radio band a channel belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelBand {
    Unknown,
    Band2GHz,
    Band5GHz,
    Band6GHz,
}

impl Display for ChannelBand {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unknown => write!(f, "unknown"),
            Self::Band2GHz => write!(f, "2GHz"),
            Self::Band5GHz => write!(f, "5GHz"),
            Self::Band6GHz => write!(f, "6GHz"),
        }
    }
}

/// Channel width, when the platform reports it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelWidth {
    Unknown,
    Mhz20,
    Mhz40,
    Mhz80,
    Mhz160,
    Mhz320,
}

impl From<u32> for ChannelWidth {
    fn from(mhz: u32) -> Self {
        match mhz {
            20 => Self::Mhz20,
            40 => Self::Mhz40,
            80 => Self::Mhz80,
            160 => Self::Mhz160,
            320 => Self::Mhz320,
            _ => Self::Unknown,
        }
    }
}

impl Display for ChannelWidth {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unknown => write!(f, "unknown"),
            Self::Mhz20 => write!(f, "20MHz"),
            Self::Mhz40 => write!(f, "40MHz"),
            Self::Mhz80 => write!(f, "80MHz"),
            Self::Mhz160 => write!(f, "160MHz"),
            Self::Mhz320 => write!(f, "320MHz"),
        }
    }
}

/// Composite channel descriptor.
///
/// Only the channel number is part of the scan table; band and width are
/// carried for callers that want them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Channel {
    /// Channel number within its band (0 when the frequency is unknown).
    pub number: u16,
    pub band: ChannelBand,
    pub width: ChannelWidth,
}

impl Channel {
    pub fn new(number: u16, band: ChannelBand) -> Self {
        Self {
            number,
            band,
            width: ChannelWidth::Unknown,
        }
    }
}

impl Display for Channel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.number)
    }
}

/// Fastest PHY mode an access point supports.
///
/// Variants are declared in generation order, so comparisons between
/// modes follow radio generations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PhyMode {
    None,
    /// 802.11a
    A,
    /// 802.11b
    B,
    /// 802.11g
    G,
    /// 802.11n, the first high-throughput generation.
    N,
    /// 802.11ac
    Ac,
    /// 802.11ax
    Ax,
    /// 802.11be
    Be,
}

impl PhyMode {
    /// Returns `true` for 802.11n-class radios and newer.
    pub fn is_high_throughput(&self) -> bool {
        *self >= Self::N
    }
}

impl Display for PhyMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::A => write!(f, "802.11a"),
            Self::B => write!(f, "802.11b"),
            Self::G => write!(f, "802.11g"),
            Self::N => write!(f, "802.11n"),
            Self::Ac => write!(f, "802.11ac"),
            Self::Ax => write!(f, "802.11ax"),
            Self::Be => write!(f, "802.11be"),
        }
    }
}

/// Authentication and key management suite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyManagement {
    Psk,
    Ieee8021x,
    Sae,
    Owe,
}

impl Display for KeyManagement {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Psk => write!(f, "PSK"),
            Self::Ieee8021x => write!(f, "802.1X"),
            Self::Sae => write!(f, "SAE"),
            Self::Owe => write!(f, "OWE"),
        }
    }
}

/// Pairwise or group cipher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cipher {
    Wep40,
    Wep104,
    Tkip,
    /// CCMP, reported as `AES` like the classic scan report does.
    Ccmp,
}

impl Display for Cipher {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Wep40 => write!(f, "WEP40"),
            Self::Wep104 => write!(f, "WEP104"),
            Self::Tkip => write!(f, "TKIP"),
            Self::Ccmp => write!(f, "AES"),
        }
    }
}

/// Contents of a WPA or RSN information element.
///
/// Displays as `auth/unicast/group`, e.g. `PSK/AES,TKIP/TKIP`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SecurityInfo {
    pub auth: Vec<KeyManagement>,
    pub unicast: Vec<Cipher>,
    pub group: Option<Cipher>,
}

impl SecurityInfo {
    /// Returns `true` if every advertised key management suite is a
    /// WPA3-only one (SAE or OWE).
    pub fn is_wpa3(&self) -> bool {
        !self.auth.is_empty()
            && self
                .auth
                .iter()
                .all(|k| matches!(k, KeyManagement::Sae | KeyManagement::Owe))
    }
}

fn write_joined<T: Display>(f: &mut Formatter<'_>, items: &[T]) -> std::fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, ",")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

impl Display for SecurityInfo {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write_joined(f, &self.auth)?;
        write!(f, "/")?;
        write_joined(f, &self.unicast)?;
        write!(f, "/")?;
        if let Some(group) = self.group {
            write!(f, "{group}")?;
        }
        Ok(())
    }
}

/// Security descriptor of a network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Security {
    /// Open network.
    None,
    /// Static WEP.
    Wep,
    /// WPA (version 1) information element only.
    Wpa(SecurityInfo),
    /// RSN information element only (WPA2 or WPA3).
    Rsn(SecurityInfo),
    /// Both WPA and RSN information elements (transition mode).
    Mixed { wpa: SecurityInfo, rsn: SecurityInfo },
    /// Descriptor recovered from a platform's textual network description.
    Described(String),
}

const SECURITY_TERM: &str = "security=";

impl Security {
    /// Recovers the security descriptor from a textual network description.
    ///
    /// Captures everything between `security=` and the next comma:
    ///
    /// ```
    /// use pinpoint::Security;
    ///
    /// let sec = Security::from_description("<CWNetwork> [ssid=Home, security=WPA2 Personal, rssi=-50]")?;
    /// assert_eq!(sec.to_string(), "WPA2 Personal");
    /// # Ok::<(), pinpoint::ScanError>(())
    /// ```
    ///
    /// # Errors
    ///
    /// Returns `ScanError::MalformedRecord` if the description has no
    /// `security=` term or the term is not terminated by a comma.
    pub fn from_description(description: &str) -> Result<Self, ScanError> {
        let start = description.find(SECURITY_TERM).ok_or_else(|| {
            ScanError::MalformedRecord(format!("no `{SECURITY_TERM}` term in {description:?}"))
        })?;
        let rest = &description[start + SECURITY_TERM.len()..];
        let end = rest.find(',').ok_or_else(|| {
            ScanError::MalformedRecord(format!(
                "unterminated `{SECURITY_TERM}` term in {description:?}"
            ))
        })?;
        Ok(Self::Described(rest[..end].to_string()))
    }
}

fn write_rsn(f: &mut Formatter<'_>, info: &SecurityInfo) -> std::fmt::Result {
    if info.is_wpa3() {
        write!(f, "WPA3({info})")
    } else {
        write!(f, "WPA2({info})")
    }
}

impl Display for Security {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => write!(f, "NONE"),
            Self::Wep => write!(f, "WEP"),
            Self::Wpa(info) => write!(f, "WPA({info})"),
            Self::Rsn(info) => write_rsn(f, info),
            Self::Mixed { wpa, rsn } => {
                write!(f, "WPA({wpa}) ")?;
                write_rsn(f, rsn)
            }
            Self::Described(s) => write!(f, "{s}"),
        }
    }
}

/// One network seen by a wireless scan.
///
/// Records live for a single scan: they are produced by the interface,
/// rendered once, and dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WirelessNetworkRecord {
    /// Network name; `None` for hidden or undecodable SSIDs.
    pub ssid: Option<String>,
    /// Access point MAC address.
    pub bssid: Option<String>,
    /// Signal strength in dBm.
    pub rssi: i32,
    pub channel: Channel,
    pub fastest_phy_mode: PhyMode,
    /// Two-letter regulatory domain advertised by the access point.
    pub country_code: Option<String>,
    pub security: Security,
}

impl WirelessNetworkRecord {
    /// Returns `true` if the access point supports 802.11n-class rates.
    pub fn supports_high_throughput(&self) -> bool {
        self.fastest_phy_mode.is_high_throughput()
    }
}

/// Errors that can occur while authorizing, scanning or reporting.
///
/// # Examples
///
/// ```no_run
/// use pinpoint::{ScanError, ScanOptions, ScanSession};
///
/// # async fn example() -> pinpoint::Result<()> {
/// let mut session = ScanSession::system(ScanOptions::default()).await?;
///
/// match session.authorize().await {
///     Ok(status) => println!("authorized: {status}"),
///     Err(ScanError::AuthorizationTimeout { attempts, .. }) => {
///         eprintln!("no location permission after {attempts} attempts");
///     }
///     Err(e) => return Err(e),
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Error)]
pub enum ScanError {
    /// A D-Bus communication error occurred.
    #[error("D-Bus error: {0}")]
    Dbus(#[from] zbus::Error),

    /// A D-Bus call failed; `context` names the operation.
    #[error("{context}: {source}")]
    DbusOperation {
        context: String,
        #[source]
        source: zbus::Error,
    },

    /// Location authorization was not granted within the retry budget.
    #[error(
        "location services authorization not granted after {attempts} attempts (last status: {last_status}); \
         allow location access for this application and try again"
    )]
    AuthorizationTimeout {
        attempts: u32,
        last_status: AuthorizationStatus,
    },

    /// No Wi-Fi device was found on the system.
    #[error("no Wi-Fi device found")]
    NoWifiDevice,

    /// The platform rejected or failed the scan request.
    #[error("scan failed: {0}")]
    ScanFailed(String),

    /// The requested scan did not complete in time.
    #[error("scan did not complete in time")]
    ScanTimeout,

    /// A network record could not be interpreted.
    #[error("malformed network record: {0}")]
    MalformedRecord(String),

    /// Writing the report failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
