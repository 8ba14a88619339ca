use std::time::Duration;

use url::Url;

/// One reachability check against the backend.
pub(crate) trait BackendProbe {
    fn check(&self, address: &Url) -> Result<(), String>;
}

/// Issues a plain GET. Any HTTP response counts as reachable; only
/// transport errors (connection refused, DNS, ...) count as failures.
pub(crate) struct HttpProbe {
    client: reqwest::blocking::Client,
}

impl HttpProbe {
    pub(crate) fn new() -> Result<Self, String> {
        let client = reqwest::blocking::Client::builder()
            .no_proxy()
            .build()
            .map_err(|error| format!("Failed to build readiness HTTP client: {error}"))?;
        Ok(Self { client })
    }
}

impl BackendProbe for HttpProbe {
    fn check(&self, address: &Url) -> Result<(), String> {
        self.client
            .get(address.as_str())
            .send()
            .map(|_| ())
            .map_err(|error| error.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PollOutcome {
    Ready { attempts: u32 },
    Cancelled { attempts: u32 },
}

/// Fixed-interval readiness loop: check, and on failure sleep once for
/// `interval` before the next check. No retry limit and no backoff.
#[derive(Debug)]
pub(crate) struct ReadinessPoller {
    address: Url,
    interval: Duration,
    attempts: u32,
}

impl ReadinessPoller {
    pub(crate) fn new(address: Url, interval: Duration) -> Self {
        Self {
            address,
            interval,
            attempts: 0,
        }
    }

    pub(crate) fn address(&self) -> &Url {
        &self.address
    }

    pub(crate) fn check_once<P: BackendProbe>(&mut self, probe: &P) -> Result<(), String> {
        self.attempts = self.attempts.saturating_add(1);
        probe.check(&self.address)
    }

    /// Runs until the first successful check or until `should_stop` says the
    /// launcher is going away. `should_stop` is consulted before every check.
    pub(crate) fn run<P, S, C, L>(
        &mut self,
        probe: &P,
        mut sleep: S,
        should_stop: C,
        log: L,
    ) -> PollOutcome
    where
        P: BackendProbe,
        S: FnMut(Duration),
        C: Fn() -> bool,
        L: Fn(&str),
    {
        loop {
            if should_stop() {
                return PollOutcome::Cancelled {
                    attempts: self.attempts,
                };
            }

            match self.check_once(probe) {
                Ok(()) => {
                    return PollOutcome::Ready {
                        attempts: self.attempts,
                    }
                }
                Err(error) => {
                    log(&format!(
                        "Backend is not ready. attempt={} address={} error={}",
                        self.attempts, self.address, error
                    ));
                    sleep(self.interval);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{
        cell::{Cell, RefCell},
        io::{Read, Write},
        net::TcpListener,
        thread,
        time::Duration,
    };

    use url::Url;

    use super::{BackendProbe, HttpProbe, PollOutcome, ReadinessPoller};

    /// Fails until the `succeed_on`-th call; tracks overlapping calls.
    struct ScriptedProbe {
        succeed_on: Option<u32>,
        calls: Cell<u32>,
        in_flight: Cell<u32>,
        max_in_flight: Cell<u32>,
        events: RefCell<Vec<String>>,
    }

    impl ScriptedProbe {
        fn new(succeed_on: Option<u32>) -> Self {
            Self {
                succeed_on,
                calls: Cell::new(0),
                in_flight: Cell::new(0),
                max_in_flight: Cell::new(0),
                events: RefCell::new(Vec::new()),
            }
        }
    }

    impl BackendProbe for ScriptedProbe {
        fn check(&self, address: &Url) -> Result<(), String> {
            self.in_flight.set(self.in_flight.get() + 1);
            self.max_in_flight
                .set(self.max_in_flight.get().max(self.in_flight.get()));
            let call = self.calls.get() + 1;
            self.calls.set(call);
            self.events.borrow_mut().push(format!("GET {address}"));
            self.in_flight.set(self.in_flight.get() - 1);

            if self.succeed_on == Some(call) {
                Ok(())
            } else {
                Err("connection refused".to_string())
            }
        }
    }

    fn backend_address() -> Url {
        Url::parse("http://localhost:5000/").expect("valid url")
    }

    #[test]
    fn ready_on_third_check_issues_exactly_three_requests() {
        let probe = ScriptedProbe::new(Some(3));
        let sleeps = RefCell::new(Vec::new());
        let mut poller = ReadinessPoller::new(backend_address(), Duration::from_millis(500));

        let outcome = poller.run(
            &probe,
            |delay| {
                probe.events.borrow_mut().push("sleep".to_string());
                sleeps.borrow_mut().push(delay);
            },
            || false,
            |_| {},
        );

        assert_eq!(outcome, PollOutcome::Ready { attempts: 3 });
        assert_eq!(probe.calls.get(), 3);
        assert_eq!(poller.attempts, 3);
        assert_eq!(
            *sleeps.borrow(),
            vec![Duration::from_millis(500), Duration::from_millis(500)]
        );
        assert_eq!(
            *probe.events.borrow(),
            vec![
                "GET http://localhost:5000/",
                "sleep",
                "GET http://localhost:5000/",
                "sleep",
                "GET http://localhost:5000/",
            ]
        );
        assert_eq!(probe.max_in_flight.get(), 1);
    }

    #[test]
    fn immediate_success_schedules_no_retry() {
        let probe = ScriptedProbe::new(Some(1));
        let sleeps = Cell::new(0);
        let mut poller = ReadinessPoller::new(backend_address(), Duration::from_millis(500));

        let outcome = poller.run(&probe, |_| sleeps.set(sleeps.get() + 1), || false, |_| {});

        assert_eq!(outcome, PollOutcome::Ready { attempts: 1 });
        assert_eq!(sleeps.get(), 0);
    }

    #[test]
    fn each_failure_schedules_exactly_one_retry_with_configured_delay() {
        for delay_ms in [0_u64, 1, 500, 10_000] {
            let delay = Duration::from_millis(delay_ms);
            let probe = ScriptedProbe::new(Some(5));
            let sleeps = RefCell::new(Vec::new());
            let mut poller = ReadinessPoller::new(backend_address(), delay);

            poller.run(&probe, |d| sleeps.borrow_mut().push(d), || false, |_| {});

            assert_eq!(*sleeps.borrow(), vec![delay; 4], "delay {delay_ms}ms");
        }
    }

    #[test]
    fn unreachable_backend_is_polled_until_stopped() {
        let probe = ScriptedProbe::new(None);
        let sleeps = Cell::new(0_u32);
        let logged = Cell::new(0_u32);
        let mut poller = ReadinessPoller::new(backend_address(), Duration::from_millis(500));

        // The window closes after the 25th failed check.
        let outcome = poller.run(
            &probe,
            |_| sleeps.set(sleeps.get() + 1),
            || probe.calls.get() >= 25,
            |message| {
                assert!(message.starts_with("Backend is not ready."));
                logged.set(logged.get() + 1);
            },
        );

        assert_eq!(outcome, PollOutcome::Cancelled { attempts: 25 });
        assert_eq!(probe.calls.get(), 25);
        assert_eq!(sleeps.get(), 25);
        assert_eq!(logged.get(), 25);
    }

    #[test]
    fn stopped_before_first_check_issues_no_request() {
        let probe = ScriptedProbe::new(Some(1));
        let mut poller = ReadinessPoller::new(backend_address(), Duration::from_millis(500));

        let outcome = poller.run(&probe, |_| {}, || true, |_| {});

        assert_eq!(outcome, PollOutcome::Cancelled { attempts: 0 });
        assert_eq!(probe.calls.get(), 0);
    }

    #[test]
    fn http_probe_treats_any_response_as_ready() {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind listener");
        let port = listener.local_addr().expect("local addr").port();
        let server = thread::spawn(move || {
            let (mut stream, _) = listener.accept().expect("accept connection");
            let mut request = [0_u8; 1024];
            let read = stream.read(&mut request).expect("read request");
            stream
                .write_all(
                    b"HTTP/1.1 503 Service Unavailable\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
                )
                .expect("write response");
            String::from_utf8_lossy(&request[..read]).to_string()
        });

        let address = Url::parse(&format!("http://127.0.0.1:{port}/")).expect("valid url");
        let probe = HttpProbe::new().expect("build probe");
        probe.check(&address).expect("any response means ready");

        let request = server.join().expect("join server");
        assert!(request.starts_with("GET / HTTP/1.1\r\n"));
    }

    #[test]
    fn http_probe_reports_connection_refused() {
        let port = {
            let listener = TcpListener::bind("127.0.0.1:0").expect("bind listener");
            listener.local_addr().expect("local addr").port()
        };

        let address = Url::parse(&format!("http://127.0.0.1:{port}/")).expect("valid url");
        let probe = HttpProbe::new().expect("build probe");
        assert!(probe.check(&address).is_err());
    }
}
