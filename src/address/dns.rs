//! Reverse DNS names.

use super::IpAddress;

impl IpAddress {
    /// Reverse zone name for this network, e.g. `10.16.172.in-addr.arpa` for
    /// `172.16.10.1/24`.
    ///
    /// Labels that fall entirely or partly inside the host bits are dropped;
    /// the remaining labels are written least significant first.
    pub fn dns_reverse(&self) -> String {
        let family = self.family();
        let dns_bits = family.dns_bits();
        let skip = self.prefix.host_prefix().div_ceil(dns_bits);
        let labels: Vec<String> = self
            .dns_parts()
            .into_iter()
            .skip(skip)
            .map(|part| family.dns_label(part))
            .collect();
        if labels.is_empty() {
            family.rev_domain().to_string()
        } else {
            format!("{}.{}", labels.join("."), family.rev_domain())
        }
    }

    /// The network cut at the next label boundary, so every piece has an
    /// exact reverse zone.
    pub fn dns_networks(&self) -> Vec<IpAddress> {
        let family = self.family();
        let dns_bits = family.dns_bits();
        let boundary = family.bits() - (self.prefix.host_prefix() / dns_bits) * dns_bits;
        if boundary == 0 {
            return vec![self.network()];
        }
        // boundary >= prefix length and the piece count is below 2^dns_bits
        self.subnet(boundary).unwrap_or_else(|_| vec![self.network()])
    }

    /// Reverse zones covering exactly this network.
    pub fn dns_rev_domains(&self) -> Vec<String> {
        self.dns_networks()
            .iter()
            .map(IpAddress::dns_reverse)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ip(s: &str) -> IpAddress {
        IpAddress::parse(s).unwrap()
    }

    #[test]
    fn test_dns_reverse_v4() {
        assert_eq!(ip("172.16.10.1/24").dns_reverse(), "10.16.172.in-addr.arpa");
        assert_eq!(ip("172.16.10.1/32").dns_reverse(), "1.10.16.172.in-addr.arpa");
        assert_eq!(ip("172.16.10.1/0").dns_reverse(), "in-addr.arpa");
    }

    #[test]
    fn test_dns_reverse_v6() {
        assert_eq!(
            ip("3ffe:505:2::f").dns_reverse(),
            "f.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.2.0.0.0.5.0.5.0.e.f.f.3.ip6.arpa"
        );
    }

    #[test]
    fn test_dns_rev_domains_v4() {
        assert_eq!(
            ip("173.17.5.1/23").dns_rev_domains(),
            vec!["4.17.173.in-addr.arpa", "5.17.173.in-addr.arpa"]
        );
        assert_eq!(
            ip("173.17.1.1/15").dns_rev_domains(),
            vec!["16.173.in-addr.arpa", "17.173.in-addr.arpa"]
        );
        assert_eq!(
            ip("173.17.1.1/7").dns_rev_domains(),
            vec!["172.in-addr.arpa", "173.in-addr.arpa"]
        );
        let host_zones = ip("173.17.1.1/29").dns_rev_domains();
        assert_eq!(host_zones.len(), 8);
        assert_eq!(host_zones[0], "0.1.17.173.in-addr.arpa");
        assert_eq!(host_zones[7], "7.1.17.173.in-addr.arpa");
        assert_eq!(ip("174.17.1.1/24").dns_rev_domains(), vec!["1.17.174.in-addr.arpa"]);
        assert_eq!(ip("175.17.1.1/16").dns_rev_domains(), vec!["17.175.in-addr.arpa"]);
        assert_eq!(ip("176.17.1.1/8").dns_rev_domains(), vec!["176.in-addr.arpa"]);
        assert_eq!(ip("177.17.1.1/0").dns_rev_domains(), vec!["in-addr.arpa"]);
        assert_eq!(ip("178.17.1.1/32").dns_rev_domains(), vec!["1.1.17.178.in-addr.arpa"]);
    }

    #[test]
    fn test_dns_rev_domains_v6() {
        assert_eq!(ip("f000:f100::/3").dns_rev_domains(), vec!["e.ip6.arpa", "f.ip6.arpa"]);
        assert_eq!(
            ip("fea3:f120::/15").dns_rev_domains(),
            vec!["2.a.e.f.ip6.arpa", "3.a.e.f.ip6.arpa"]
        );
        assert_eq!(
            ip("3a03:2f80:f::/48").dns_rev_domains(),
            vec!["f.0.0.0.0.8.f.2.3.0.a.3.ip6.arpa"]
        );
    }

    #[test]
    fn test_dns_networks() {
        let nets: Vec<String> = ip("fd01:db8::4/3").dns_networks().iter().map(|n| n.to_string()).collect();
        assert_eq!(nets, vec!["e000::/4", "f000::/4"]);
    }
}
